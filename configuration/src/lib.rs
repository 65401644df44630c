use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use serde::Deserialize;

pub fn get_config<'de, T: Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Deserialize)]
pub struct ResponderConfiguration {
    pub server: ServerConfiguration,
    #[serde(default)]
    pub limits: LimitsConfiguration,
    #[serde(default)]
    pub answer: AnswerConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    ip_address: IpAddr,
    port: u16,
}

impl ServerConfiguration {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip_address, self.port)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfiguration {
    pub max_questions: usize,
    pub max_answers: usize,
    pub max_authorities: usize,
    pub max_additionals: usize,
}

impl Default for LimitsConfiguration {
    fn default() -> Self {
        Self {
            max_questions: 10,
            max_answers: 10,
            max_authorities: 10,
            max_additionals: 10,
        }
    }
}

/// The A record sent back to every query.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnswerConfiguration {
    pub name: String,
    pub address: Ipv4Addr,
    pub ttl: u32,
}

impl Default for AnswerConfiguration {
    fn default() -> Self {
        Self {
            name: String::from("google.com."),
            address: Ipv4Addr::new(142, 251, 16, 102),
            ttl: 0,
        }
    }
}
