use anyhow::Result;

fn main() -> Result<()> {
    fretwork::repl::start()
}
