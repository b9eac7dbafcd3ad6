use std::io::{self, BufRead, Write};
use todomvc_demo::driver::{Driver, Outcome, HELP};
use todomvc_demo::launch_with_storage;
use todomvc_demo::persist::Storage;

const DEFAULT_STORE: &str = "todos.json";

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_STORE.to_owned());
    let storage = Storage::new(path);
    log::info!("using {}", storage.path().display());
    let driver = Driver::new(launch_with_storage(storage)?);

    println!("{HELP}\n");
    println!("{}", driver.summary());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match driver.execute(&line) {
            Ok(Outcome::Continue(output)) if output.is_empty() => {}
            Ok(Outcome::Continue(output)) => println!("{output}"),
            Ok(Outcome::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }
    Ok(())
}
