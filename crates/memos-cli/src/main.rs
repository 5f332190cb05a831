mod logging;
mod surface;

use std::cell::Cell;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use memos_core::config::Config;
use memos_core::create_store;
use memos_core::Action;
use memos_core::AppScreenMiddlewares;
use memos_core::ConfigureServerAction;
use memos_core::FileFlagStore;
use memos_core::HttpsUrlValidator;
use memos_core::LifecycleAction;
use memos_core::NavigationAction;
use memos_core::NavigationController;
use memos_core::OnboardingAction;
use memos_core::OverlayState;
use memos_core::PrivacyPolicyAction;
use memos_core::PrivacyPolicyStorage;
use memos_core::SurfaceError;
use tracing::info;

use crate::logging::LogSettings;
use crate::surface::describe_event;
use crate::surface::render;
use crate::surface::TextSurfaceFactory;

const CONFIG_FILE: &str = "config.toml";
const FLAGS_FILE: &str = "flags.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1).peekable();
    match args.peek().map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            print_help();
            Ok(())
        }
        Some("--version" | "-V" | "version") => {
            println!("memos {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            let options = parse_options(args.collect::<Vec<_>>())?;
            run_shell(options)
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config: Option<PathBuf>,
    flags: Option<PathBuf>,
}

fn parse_options(args: Vec<String>) -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--config requires a path".into());
                };
                options.config = Some(PathBuf::from(value));
                i += 2;
            }
            "--flags" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--flags requires a path".into());
                };
                options.flags = Some(PathBuf::from(value));
                i += 2;
            }
            other => {
                return Err(format!("unsupported argument: {other}").into());
            }
        }
    }
    Ok(options)
}

fn memos_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".memos"))
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match memos_home().map(|home| home.join(CONFIG_FILE)) {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };
    let raw = fs::read_to_string(&path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let config = toml::from_str(&raw)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    Ok(config)
}

fn run_shell(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(options.config.as_deref())?;
    LogSettings::resolve(&config.logging)?
        .init()
        .map_err(|err| format!("failed to initialise logging: {err}"))?;

    let flags_path = options
        .flags
        .or_else(|| config.storage.flags_path.clone())
        .or_else(|| memos_home().map(|home| home.join(FLAGS_FILE)))
        .ok_or("cannot locate a home directory; pass --flags PATH")?;
    let flags = Rc::new(FileFlagStore::open(&flags_path)?);
    info!(path = %flags_path.display(), "using flag file");

    let exited = Rc::new(Cell::new(false));
    let exit_flag = Rc::clone(&exited);
    let store = create_store(&config.store, move || exit_flag.set(true));
    let host = AppScreenMiddlewares::new(
        store.clone(),
        PrivacyPolicyStorage::new(flags),
        Rc::new(HttpsUrlValidator::new()?),
    );
    let controller = Rc::new(RefCell::new(NavigationController::new(
        TextSurfaceFactory::default(),
        host,
    )));

    let sync_error: Rc<RefCell<Option<SurfaceError>>> = Rc::default();
    let subscription = {
        let controller = Rc::clone(&controller);
        let sync_error = Rc::clone(&sync_error);
        store.subscribe(move |state| {
            match controller.borrow_mut().sync(&state.navigation) {
                Ok(events) => {
                    for event in events {
                        println!("{}", describe_event(&event));
                    }
                }
                Err(err) => {
                    sync_error.borrow_mut().get_or_insert(err);
                }
            }
        })
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if let Some(err) = sync_error.borrow_mut().take() {
            return Err(err.into());
        }
        if exited.get() {
            break;
        }
        print!(
            "{}",
            render(&store.state(), controller.borrow().top_surface())
        );
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match command {
            Command::Dispatch(Action::ConfigureServer(_))
                if store.state().configure_server().is_none() =>
            {
                println!("the server url can only be edited on the server screen");
            }
            Command::Dispatch(action) => {
                if let Err(err) = store.dispatch(action) {
                    eprintln!("error: {err}");
                }
            }
            Command::State => {
                println!("{}", serde_json::to_string_pretty(&*store.state())?);
            }
            Command::Help => print_commands(),
            Command::Quit => break,
        }
    }

    subscription.dispose();
    for event in controller.borrow_mut().teardown()? {
        info!(event = %describe_event(&event), "surface released");
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Dispatch(Action),
    State,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "get-started" => Command::Dispatch(OnboardingAction::GetStarted.into()),
        "accept" => Command::Dispatch(PrivacyPolicyAction::Accepted.into()),
        "back" => Command::Dispatch(Action::go_back()),
        "url" => Command::Dispatch(
            ConfigureServerAction::ServerUrlChanged(rest.to_string()).into(),
        ),
        "next" => Command::Dispatch(ConfigureServerAction::Next.into()),
        "dialog" => {
            let Some((title, message)) = rest.split_once(':') else {
                return Err("usage: dialog <title>: <message>".to_string());
            };
            Command::Dispatch(Action::Navigation(NavigationAction::ShowOverlay(
                OverlayState::Dialog {
                    title: title.trim().to_string(),
                    message: message.trim().to_string(),
                },
            )))
        }
        "dismiss" => Command::Dispatch(Action::Navigation(NavigationAction::DismissOverlay)),
        "finish" => Command::Dispatch(LifecycleAction::OnDestroy { is_finishing: true }.into()),
        "recreate" => Command::Dispatch(
            LifecycleAction::OnDestroy {
                is_finishing: false,
            }
            .into(),
        ),
        "state" => Command::State,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(command))
}

fn print_help() {
    println!("memos {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  memos [--config PATH] [--flags PATH]");
    println!("  memos --help");
    println!("  memos --version");
    println!();
    print_commands();
}

fn print_commands() {
    println!("Commands:");
    println!("  get-started               leave the welcome screen");
    println!("  accept                    accept the privacy policy");
    println!("  url <text>                edit the server url");
    println!("  next                      validate the server url");
    println!("  dialog <title>: <message> show a dialog");
    println!("  dismiss                   dismiss the dialog");
    println!("  back                      go back (exits on the first screen)");
    println!("  finish                    destroy the session and reset state");
    println!("  recreate                  destroy and recreate, keeping state");
    println!("  state                     dump the state as JSON");
    println!("  quit");
}
