use crate::boards::{BoardService, CreateThreadInput};
use crate::database::Database;
use crate::model::REPLY_TOMBSTONE;
use crate::replies::{AppendReplyInput, ReplyService};
use anyhow::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_BOARD: &str = "general";

/// Run the interactive CLI used for browsing and moderating boards.
pub async fn run_cli(database: Database) -> Result<()> {
    let mut session = CliSession {
        board: DEFAULT_BOARD.to_string(),
        boards: BoardService::new(database.clone()),
        replies: ReplyService::new(database),
    };

    println!("Nullchan CLI ready. Type 'help' for a list of commands.");
    println!("Current board: /{}/", session.board);

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        print!("nullchan:/{}/> ", session.board);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            println!("Exiting");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens = match shell_words::split(trimmed) {
            Ok(tokens) if !tokens.is_empty() => tokens,
            Ok(_) => continue,
            Err(err) => {
                println!("Unable to parse command: {err}");
                continue;
            }
        };

        match session.handle_command(&tokens) {
            Ok(LoopAction::Continue) => {}
            Ok(LoopAction::Exit) => break,
            Err(err) => {
                println!("Error: {err:#}");
            }
        }
    }

    Ok(())
}

struct CliSession {
    board: String,
    boards: BoardService,
    replies: ReplyService,
}

enum LoopAction {
    Continue,
    Exit,
}

impl CliSession {
    fn handle_command(&mut self, tokens: &[String]) -> Result<LoopAction> {
        let command = tokens[0].as_str();
        match command {
            "help" => {
                self.print_help();
                Ok(LoopAction::Continue)
            }
            "board" => {
                if let Some(name) = tokens.get(1) {
                    self.board = name.clone();
                }
                println!("Current board: /{}/", self.board);
                Ok(LoopAction::Continue)
            }
            "threads" | "list" => {
                self.list_threads()?;
                Ok(LoopAction::Continue)
            }
            "view" | "thread" => {
                if tokens.len() < 2 {
                    println!("Usage: view <thread_id>");
                    return Ok(LoopAction::Continue);
                }
                self.view_thread(&tokens[1])?;
                Ok(LoopAction::Continue)
            }
            "new-thread" | "post" => {
                if tokens.len() < 3 {
                    println!("Usage: new-thread \"text\" <delete_password>");
                    return Ok(LoopAction::Continue);
                }
                self.create_thread(tokens[1].clone(), tokens[2].clone())?;
                Ok(LoopAction::Continue)
            }
            "reply" => {
                if tokens.len() < 4 {
                    println!("Usage: reply <thread_id> \"text\" <delete_password>");
                    return Ok(LoopAction::Continue);
                }
                self.create_reply(tokens[1].clone(), tokens[2].clone(), tokens[3].clone())?;
                Ok(LoopAction::Continue)
            }
            "report-thread" => {
                if tokens.len() < 2 {
                    println!("Usage: report-thread <thread_id>");
                    return Ok(LoopAction::Continue);
                }
                self.boards.report_thread(&self.board, &tokens[1])?;
                println!("Reported thread {}", tokens[1]);
                Ok(LoopAction::Continue)
            }
            "report-reply" => {
                if tokens.len() < 3 {
                    println!("Usage: report-reply <thread_id> <reply_id>");
                    return Ok(LoopAction::Continue);
                }
                self.replies
                    .report_reply(&self.board, &tokens[1], &tokens[2])?;
                println!("Reported reply {}", tokens[2]);
                Ok(LoopAction::Continue)
            }
            "delete-thread" => {
                if tokens.len() < 3 {
                    println!("Usage: delete-thread <thread_id> <delete_password>");
                    return Ok(LoopAction::Continue);
                }
                self.boards
                    .delete_thread(&self.board, &tokens[1], &tokens[2])?;
                println!("Deleted thread {}", tokens[1]);
                Ok(LoopAction::Continue)
            }
            "delete-reply" => {
                if tokens.len() < 4 {
                    println!("Usage: delete-reply <thread_id> <reply_id> <delete_password>");
                    return Ok(LoopAction::Continue);
                }
                self.replies
                    .delete_reply(&self.board, &tokens[1], &tokens[2], &tokens[3])?;
                println!("Deleted reply {}", tokens[2]);
                Ok(LoopAction::Continue)
            }
            "quit" | "exit" => Ok(LoopAction::Exit),
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                Ok(LoopAction::Continue)
            }
            other => {
                println!("Unknown command '{other}'. Type 'help' for a list of commands.");
                Ok(LoopAction::Continue)
            }
        }
    }

    fn print_help(&self) {
        println!("Available commands:");
        println!("  help                      Show this help message");
        println!("  board [NAME]              Show or switch the current board");
        println!("  threads                   List recent threads on the current board");
        println!("  view <thread_id>          Display a thread with all of its replies");
        println!("  new-thread TEXT PW        Post a new thread (PW authorizes deletion)");
        println!("  reply <thread_id> TEXT PW Post a reply to an existing thread");
        println!("  report-thread <id>        Flag a thread for review");
        println!("  report-reply <tid> <rid>  Flag a reply for review");
        println!("  delete-thread <id> PW     Remove a thread (password required)");
        println!("  delete-reply <tid> <rid> PW  Blank out a reply (password required)");
        println!("  clear                     Clear the screen");
        println!("  exit                      Quit the CLI");
    }

    fn list_threads(&self) -> Result<()> {
        let threads = self.boards.list_threads(&self.board)?;
        if threads.is_empty() {
            println!("No threads yet. Use 'new-thread' to create one.");
            return Ok(());
        }
        println!("Threads on /{}/:", self.board);
        for thread in threads {
            println!(
                "  [{}] {} (replies: {}, bumped {})",
                thread.id, thread.text, thread.reply_count, thread.bumped_on
            );
        }
        Ok(())
    }

    fn view_thread(&self, thread_id: &str) -> Result<()> {
        let view = self.replies.get_thread(&self.board, thread_id)?;

        println!("Thread: {}", view.text);
        println!("Created {}  Bumped {}", view.created_on, view.bumped_on);
        if view.replies.is_empty() {
            println!("  (no replies yet)");
        }
        for (index, reply) in view.replies.iter().enumerate() {
            println!();
            println!("Reply #{} ({})", index + 1, reply.id);
            println!("Created: {}", reply.created_on);
            if reply.text == REPLY_TOMBSTONE {
                println!("Text: (deleted)");
            } else {
                println!("Text: {}", reply.text);
            }
        }
        Ok(())
    }

    fn create_thread(&self, text: String, delete_password: String) -> Result<()> {
        let id = self.boards.create_thread(
            &self.board,
            CreateThreadInput {
                text,
                delete_password,
            },
        )?;
        println!("Created thread {id}");
        Ok(())
    }

    fn create_reply(&self, thread_id: String, text: String, delete_password: String) -> Result<()> {
        let id = self.replies.append_reply(
            &self.board,
            AppendReplyInput {
                thread_id,
                text,
                delete_password,
            },
        )?;
        println!("Posted reply {id}");
        Ok(())
    }
}
