use screenlog::{Config, run};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config))
}
