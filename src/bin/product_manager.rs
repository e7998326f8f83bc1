//! 终端版产品管理界面
//!
//! 启动时加载列表，然后从标准输入逐行读取命令。

use product_manager::{
    client::{App, Field, HttpProductApi, ProductApi},
    infrastructure::{config::LoggingConfig, logger::Logger},
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq)]
enum Command {
    Set(Field, String),
    Add,
    Delete(String),
    Reload,
    List,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "name" | "price" | "description" => Ok(Command::Set(word.parse()?, rest.to_string())),
        "add" => Ok(Command::Add),
        "delete" if !rest.is_empty() => Ok(Command::Delete(rest.to_string())),
        "delete" => Err("usage: delete <n|id>".to_string()),
        "reload" => Ok(Command::Reload),
        "list" | "" => Ok(Command::List),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (try `help`)", other)),
    }
}

const HELP: &str = "commands:
  name <text>          set the product name
  price <text>         set the product price
  description <text>   set the description
  add                  submit the form
  delete <n|id>        delete by list number or id
  reload               fetch the list again
  list                 show the list
  quit";

async fn run<A: ProductApi>(app: &mut App<A>, command: Command) -> bool {
    let result = match command {
        Command::Set(field, value) => {
            app.set_field(field, value);
            Ok(())
        }
        Command::Add => match app.submit_form().await {
            Ok(false) => {
                // 名称或价格为空，静默忽略
                return true;
            }
            other => other.map(|_| ()),
        },
        Command::Delete(selector) => {
            let Some(event) = app.list().delete_control(&selector) else {
                println!("no product matches {:?}", selector);
                return true;
            };
            app.handle_delete(event).await
        }
        Command::Reload => app.load().await,
        Command::List => Ok(()),
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    };

    match result {
        Ok(()) => println!("{}", app.view()),
        Err(e) => println!("error: {}", e),
    }
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = Logger::init(&LoggingConfig {
        level: "warn".to_string(),
        ..LoggingConfig::default()
    })?;

    let mut app = App::new(HttpProductApi::from_env());
    println!("Using {}", app.api().base_url());

    if let Err(e) = app.load().await {
        println!("error: {}", e);
    }
    println!("{}", app.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(command) => {
                if !run(&mut app, command).await {
                    break;
                }
            }
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
