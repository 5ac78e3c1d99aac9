use anyhow::Result;
use clap::Args;
use questforge_core::{Role, visible_nav_links};

#[derive(Args, Debug)]
pub struct NavArgs {
    /// Role whose menu to show
    #[arg(long)]
    pub role: Role,
}

pub fn run(args: NavArgs) -> Result<()> {
    for link in visible_nav_links(&args.role.permissions()) {
        println!("{:<12} {}", link.label, link.path);
    }
    Ok(())
}
