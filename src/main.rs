use chess_two::console::ConsoleHandler;

fn main() -> anyhow::Result<()> {
    let mut console = ConsoleHandler::new();
    console.run()
}
