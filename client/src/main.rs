#[macro_use]
mod log;

mod api;
mod model;

use api::HttpApi;
use model::TaskList;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());

    let mut list = TaskList::new(HttpApi::new(&addr));
    list.refresh().await;

    log!("Connected to {}. Commands: add <text>, done <n>, edit <n>, rm <n>, list, quit", addr);
    render(&list);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Error reading input: {}", e);
                break;
            }
        };

        // Edit mode first: empty line cancels, anything else saves.
        if list.editing().is_some() {
            if line.trim().is_empty() {
                list.cancel_edit();
                log!("Edit cancelled");
            } else {
                list.set_edit_draft(&line);
                list.save_edit().await;
                if list.editing().is_some() {
                    log!("Edit not saved, still editing");
                }
            }
            render(&list);
            continue;
        }

        let (command, rest) = match line.trim_start().split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "add" => {
                list.set_draft(rest);
                list.submit().await;
            }
            "done" | "toggle" => {
                if let Some(id) = task_id_at(&list, rest) {
                    list.toggle(id).await;
                }
            }
            "edit" => {
                if let Some(id) = task_id_at(&list, rest) {
                    if list.start_edit(id) {
                        log!("Editing. Enter new text, or an empty line to cancel:");
                        continue;
                    }
                }
            }
            "rm" | "delete" => {
                if let Some(id) = task_id_at(&list, rest) {
                    list.remove(id).await;
                }
            }
            "list" | "" => {
                list.refresh().await;
            }
            "quit" | "exit" => break,
            other => {
                log!("Unknown command: {}", other);
                continue;
            }
        }

        render(&list);
    }
}

/// Map a 1-based display index to a task id.
fn task_id_at(list: &TaskList<HttpApi>, arg: &str) -> Option<i32> {
    let index: usize = match arg.parse() {
        Ok(n) => n,
        Err(_) => {
            log!("Expected a task number, got '{}'", arg);
            return None;
        }
    };

    match list.tasks().get(index.wrapping_sub(1)) {
        Some(task) => Some(task.id),
        None => {
            log!("No task #{}", index);
            None
        }
    }
}

fn render(list: &TaskList<HttpApi>) {
    if list.tasks().is_empty() {
        log!("No todos yet. Add one with: add <text>");
        return;
    }

    for (i, task) in list.tasks().iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        log!("{:>3}. [{}] {}", i + 1, mark, task.text);
    }
    log!("{} of {} completed", list.completed_count(), list.total_count());
}
