use dikert::args::CliCommand;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match dikert::args::parse_cli_args().command {
        CliCommand::Example(example_args) => {
            if let Err(err) = dikert::example::display_config(example_args) {
                eprintln!("CONFIG ERROR!");
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        CliCommand::Run(run_args) => {
            // 1. Build the targets from the run arguments and config files
            let targets = match dikert::build_targets(run_args) {
                Ok(targets) => targets,
                Err(err) => {
                    eprintln!("CONFIG ERROR!");
                    eprintln!("{}", err);
                    std::process::exit(1);
                },
            };

            // 2. Run the stages
            if let Err(err) = dikert::run_process(targets) {
                eprintln!("PROCESS ERROR!");
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
    }
}
