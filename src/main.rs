use anyhow::Result;

mod demo;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let grounded = std::env::args().skip(1).any(|arg| arg == "--grounded");
    let mut demo = demo::DemoState::new(grounded)?;
    demo.run()?;

    Ok(())
}
