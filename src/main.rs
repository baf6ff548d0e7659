fn main() {
    use kapigraph::cli::parse;
    let cli = parse();
    kapigraph::app::init_logging(&cli);
    let code = kapigraph::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
