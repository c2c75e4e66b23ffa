use anyhow::Result;

fn main() -> Result<()> {
    fim_cli::main_entry()
}
