use clap::Parser;
use drumkit::options::Options;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::parse();

    match drumkit::repl::start(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("drumkit: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
