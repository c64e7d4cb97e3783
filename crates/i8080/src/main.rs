fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match i8080::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{}", i8080::USAGE);
            std::process::exit(2);
        }
    };

    log::info!("Running {} program(s)", options.programs.len());
    let stdout = std::io::stdout();
    i8080::run(&options, stdout.lock())?;
    Ok(())
}
