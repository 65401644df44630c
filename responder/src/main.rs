use std::error::Error;

use configuration::ResponderConfiguration;
use dns::{FixedAnswer, Limits};
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

use crate::cli_args::CliArgs;
use crate::serve::Responder;

mod cli_args;
mod serve;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: CliArgs = argh::from_env();
    let c: ResponderConfiguration = configuration::get_config(args.config)?;
    tracing::debug!("configuration: {:?}", c);

    let limits = Limits {
        max_questions: c.limits.max_questions,
        max_answers: c.limits.max_answers,
        max_authorities: c.limits.max_authorities,
        max_additionals: c.limits.max_additionals,
    };
    let answer = FixedAnswer::new(&c.answer.name, c.answer.address, c.answer.ttl)?;

    let address = c.server.bind_address();
    let sock = UdpSocket::bind(address).await?;
    tracing::info!("Listening on: {}, pid: {}", sock.local_addr()?, std::process::id());

    let responder = Responder::new(limits, answer);
    responder.serve(&sock).await?;

    Ok(())
}
