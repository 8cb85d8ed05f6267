fn main() -> anyhow::Result<()> {
    // Guard: if Python multiprocessing "spawn" re-launched this binary
    // as a worker (sys.executable points at the server when the
    // interpreter is embedded), exit before creating the tokio runtime.
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a.contains("multiprocessing"))
        || std::env::var("_PYTHON_MULTIPROCESSING_WORKER").is_ok()
    {
        return Ok(());
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(api_server::run_server())
}
