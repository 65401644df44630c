use std::path::PathBuf;
use argh::FromArgs;

fn default_config_path() -> PathBuf {
    PathBuf::from("./responder_config.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "answer every DNS query on UDP with a fixed A record")]
pub struct CliArgs {
    #[argh(
        option,
        description = "config file path, default: './responder_config.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,
}
