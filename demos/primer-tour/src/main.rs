use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context as _;
use primer_core::SystemClock;
use primer_shell::{Command, Config, PanelEnv, Shell};

const CONFIG_VAR: &str = "PRIMER_CONFIG";

fn load_config() -> anyhow::Result<Config> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_VAR).map(PathBuf::from));
    match path {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn print_help(shell: &Shell) {
    println!("tour commands:");
    println!("  menu                 list the demos");
    println!("  select <id>          switch demo");
    println!("  show                 render again");
    println!("  wait <ms>            let time pass, then render");
    println!("  help                 this text");
    println!("  quit");
    println!("{} commands:", shell.current_panel());
    for (usage, what) in shell.panel_commands() {
        println!("  {usage:<20} {what}");
    }
}

fn show(shell: &Shell) {
    shell.env().pump();
    println!("{}", shell.render().render_text());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let env = PanelEnv::from_config(&config, Rc::new(SystemClock::new()));
    let shell = Shell::new(env, config.initial_demo);
    show(&shell);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(cmd) = Command::parse(&line) else {
            show(&shell);
            continue;
        };

        match cmd.verb.as_str() {
            "quit" | "exit" => break,
            "help" => {
                print_help(&shell);
                continue;
            }
            "menu" => {
                for item in shell.menu() {
                    let marker = if item.active { ">" } else { " " };
                    println!("{marker} {:>2}. {} {}", item.entry.id.id(), item.entry.icon, item.entry.name);
                }
                continue;
            }
            "select" => match cmd.number::<u8>(0, "demo id") {
                Ok(id) => shell.select(id),
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
            "show" => {}
            "wait" | "tick" => match cmd.number::<u64>(0, "duration in ms") {
                Ok(ms) => std::thread::sleep(Duration::from_millis(ms)),
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            },
            _ => {
                if let Err(e) = shell.dispatch(&cmd) {
                    log::debug!("rejected `{}`", line.trim());
                    eprintln!("{e} (try `help`)");
                    continue;
                }
            }
        }
        show(&shell);
    }
    Ok(())
}
