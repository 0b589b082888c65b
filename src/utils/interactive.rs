use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue, style,
    terminal::{self, ClearType},
};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::core::traits::Console;
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;

/// Console backed by the process's stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn input(&mut self, message: &str, default: Option<&str>) -> AppResult<String> {
        let prompt = match default {
            Some(default) => format!(
                "{} {} {} ",
                OutputStyle::success("?"),
                OutputStyle::title(message),
                OutputStyle::muted(&format!("({})", default))
            ),
            None => format!("{} {} ", OutputStyle::success("?"), OutputStyle::title(message)),
        };

        let input = prompt_input(&prompt)?;
        match default {
            Some(default) if input.is_empty() => Ok(default.to_string()),
            _ => Ok(input),
        }
    }

    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> AppResult<usize> {
        if choices.is_empty() {
            return Err(AppError::Io("nothing to select from".to_string()));
        }

        let selected = if io::stdin().is_terminal() {
            select_from_list(message, choices, default)?
        } else {
            select_by_number(message, choices, default)?
        };

        match selected {
            Some(index) => {
                println!(
                    "{} {} {}",
                    OutputStyle::success("?"),
                    OutputStyle::title(message),
                    OutputStyle::label(choices[index])
                );
                Ok(index)
            }
            None => Err(AppError::Io("Selection cancelled by user".to_string())),
        }
    }

    fn clear(&mut self) -> AppResult<()> {
        execute!(io::stdout(), terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

/// Read one line without its line ending; a closed stdin is an error
pub fn prompt_input(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Err(AppError::Io("stdin closed".to_string()));
    }

    Ok(strip_line_ending(&input).to_string())
}

/// Drop the trailing `\n` or `\r\n`; other whitespace is part of the answer
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Arrow-key selection drawn in place below the current line
pub fn select_from_list(message: &str, items: &[&str], default: usize) -> AppResult<Option<usize>> {
    let mut stdout = io::stdout();
    println!(
        "{} {} {}",
        OutputStyle::success("?"),
        OutputStyle::title(message),
        OutputStyle::muted("(use arrow keys)")
    );

    terminal::enable_raw_mode()?;

    let mut selected = default.min(items.len() - 1);
    let result = (|| -> io::Result<Option<usize>> {
        draw_items(&mut stdout, items, selected)?;

        loop {
            let key = match event::read()? {
                Event::Key(key @ KeyEvent { kind: KeyEventKind::Press, .. }) => key,
                _ => continue,
            };

            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = if selected == 0 { items.len() - 1 } else { selected - 1 };
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    selected = (selected + 1) % items.len();
                }
                KeyCode::Enter => break Ok(Some(selected)),
                KeyCode::Esc => break Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    break Ok(None);
                }
                _ => continue,
            }

            queue!(stdout, cursor::MoveUp(items.len() as u16))?;
            draw_items(&mut stdout, items, selected)?;
        }
    })();

    // Erase the list and the question line; the caller prints the answer.
    let cleanup = execute!(
        stdout,
        cursor::MoveUp(items.len() as u16 + 1),
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown)
    );
    terminal::disable_raw_mode()?;
    cleanup?;

    Ok(result?)
}

fn draw_items(stdout: &mut io::Stdout, items: &[&str], selected: usize) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        queue!(stdout, cursor::MoveToColumn(0), terminal::Clear(ClearType::CurrentLine))?;
        if i == selected {
            queue!(
                stdout,
                style::Print(format!("{} {}", OutputStyle::label("❯"), OutputStyle::label(item)))
            )?;
        } else {
            queue!(stdout, style::Print(format!("  {}", item)))?;
        }
        queue!(stdout, style::Print("\r\n"))?;
    }
    stdout.flush()
}

/// Numbered fallback used when stdin is not a terminal
fn select_by_number(message: &str, items: &[&str], default: usize) -> AppResult<Option<usize>> {
    println!("{} {}", OutputStyle::success("?"), OutputStyle::title(message));
    for (i, item) in items.iter().enumerate() {
        println!("  {}) {}", i + 1, item);
    }

    loop {
        let input = prompt_input(&format!("  Answer {}: ", OutputStyle::muted(&format!("({})", default + 1))))?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(Some(default.min(items.len() - 1)));
        }
        match input.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("{}", OutputStyle::warning(&format!("Please enter a number between 1 and {}", items.len()))),
        }
    }
}
