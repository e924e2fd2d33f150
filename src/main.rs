use std::io::{
    self,
    BufRead,
    Write,
};

use boardpulse::{
    agent,
    BoardPulseError,
    MondayClient,
};

#[tokio::main]
async fn main() -> Result<(), BoardPulseError> {
    println!("boardpulse - ask questions against the deals and work order boards");

    let mut client = MondayClient::from_env()?;
    if let Err(error) = client.validate_connection().await {
        eprintln!("Could not reach the board API: {}", error);
        eprintln!("Continuing with an empty snapshot; type 'refresh' to retry.");
    }

    let mut snapshot = agent::refresh(&mut client).await;
    println!("Snapshot ready (fetched at {}). Type a question, 'refresh', or 'quit'.", snapshot.last_fetch);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.eq_ignore_ascii_case("refresh") {
            snapshot = agent::refresh(&mut client).await;
            println!("Snapshot refreshed at {}", snapshot.last_fetch);
            continue;
        }

        let response = agent::answer(&snapshot, query);
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
