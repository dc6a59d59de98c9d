use clap::CommandFactory;
use clap_complete::Shell;

pub fn run(shell: Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = crate::Cli::command();
    clap_complete::generate(shell, &mut cmd, "digidiary", &mut std::io::stdout());
    Ok(())
}
