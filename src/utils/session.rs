use std::io::{BufRead, Write};
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use regex::Regex;
use serde_json::to_string_pretty;
use crate::config::Config;
use crate::models::{CourseField, CourseId, Outcome, Summary};
use crate::utils::grades::GradeTable;
use crate::utils::ledger::{coerce_credits, CourseLedger};

const HELP: &str = "\
Commands:
  add                         add an empty course row
  rm <id>                     remove a course (the last row is kept)
  set <id> name <text>        rename a course
  set <id> grade <grade>      set the letter grade (empty to unset)
  set <id> credits <n>        set credit hours
  list                        show all courses and the CGPA
  grades                      show the grade scale
  json                        dump courses and summary as JSON
  help                        show this message
  quit                        leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Remove(CourseId),
    Set { id: CourseId, field: CourseField, value: String },
    List,
    Grades,
    Json,
    Help,
    Quit,
}

pub struct CommandParser {
    pattern: Regex,
}

impl CommandParser {
    // Compiles the command pattern once per session.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^\s*(?P<cmd>[A-Za-z]+)(?:\s+(?P<id>\d+))?(?:\s+(?P<field>[A-Za-z]+))?(?:\s(?P<value>.*))?$")
            .context("Failed to compile the command pattern")?;
        Ok(CommandParser { pattern })
    }

    // Blank lines parse to `None`.
    pub fn parse(&self, line: &str) -> Result<Option<Command>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let captures = self.pattern.captures(line).ok_or_else(|| anyhow!("Could not read '{}'", line.trim()))?;
        let cmd = captures["cmd"].to_ascii_lowercase();
        let id = match captures.name("id") {
            Some(m) => Some(CourseId(m.as_str().parse().context("Course id is too large")?)),
            None => None,
        };
        let field = captures.name("field").map(|m| m.as_str());
        let value = captures.name("value").map_or("", |m| m.as_str().trim());
        let trailing = field.is_some() || !value.is_empty();
        let bare = id.is_none() && !trailing;

        let command = match cmd.as_str() {
            "add" => expect_bare(bare, "add", Command::Add)?,
            "rm" | "remove" => match id {
                Some(id) if !trailing => Command::Remove(id),
                _ => return Err(anyhow!("Usage: rm <id>")),
            },
            "set" => {
                let (id, field) = id.zip(field).ok_or_else(|| anyhow!("Usage: set <id> <name|grade|credits> <value>"))?;
                Command::Set { id, field: field.parse()?, value: value.to_string() }
            }
            "list" | "ls" => expect_bare(bare, "list", Command::List)?,
            "grades" => expect_bare(bare, "grades", Command::Grades)?,
            "json" => expect_bare(bare, "json", Command::Json)?,
            "help" => expect_bare(bare, "help", Command::Help)?,
            "quit" | "exit" => expect_bare(bare, "quit", Command::Quit)?,
            other => return Err(anyhow!("Unknown command '{}', type 'help'", other)),
        };
        Ok(Some(command))
    }
}

// Commands without arguments refuse anything after the command word.
fn expect_bare(bare: bool, usage: &str, command: Command) -> Result<Command> {
    if bare {
        Ok(command)
    } else {
        Err(anyhow!("Usage: {} (takes no arguments)", usage))
    }
}

// One interactive editing session over a single in-memory ledger.
pub struct Session {
    ledger: CourseLedger,
    config: Config,
    parser: CommandParser,
}

impl Session {
    // Starts with a fresh single-row ledger.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Session { ledger: CourseLedger::new(), config, parser: CommandParser::new()? })
    }

    pub fn ledger(&self) -> &CourseLedger {
        &self.ledger
    }

    // Reads commands line by line until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        info!("Session started");
        writeln!(out, "CGPA calculator, type 'help' for commands.")?;
        writeln!(out, "{}", render_ledger(&self.ledger, self.config.credits_hint))?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let command = match self.parser.parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command, out)?;
        }

        info!("Session ended");
        Ok(())
    }

    // Applies one command to the ledger and prints the result.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Add => {
                let outcome = self.ledger.add();
                report(out, &outcome, self.ledger.len())?;
            }
            Command::Remove(id) => {
                let outcome = self.ledger.remove(id);
                if !outcome.changed {
                    if self.ledger.get(id).is_some() {
                        writeln!(out, "At least one course must remain")?;
                    } else {
                        writeln!(out, "No course {}", id)?;
                    }
                }
                report(out, &outcome, self.ledger.len())?;
            }
            Command::Set { id, field, value } => {
                if self.ledger.get(id).is_none() {
                    writeln!(out, "No course {}", id)?;
                    let outcome = self.ledger.update(id, field, &value);
                    report(out, &outcome, self.ledger.len())?;
                    return Ok(());
                }
                let value = match field {
                    CourseField::Grade => {
                        let grade = value.to_ascii_uppercase();
                        if !grade.is_empty() && !GradeTable::contains(&grade) {
                            warn!("Refused grade '{}' for course {}", value, id);
                            writeln!(out, "Unknown grade '{}', expected one of: {}", value, grade_keys())?;
                            return Ok(());
                        }
                        grade
                    }
                    CourseField::Credits => {
                        let credits = coerce_credits(&value);
                        if credits > self.config.credits_hint {
                            writeln!(out, "Note: {} credits is above the usual maximum of {}", credits, self.config.credits_hint)?;
                        }
                        value
                    }
                    CourseField::Name => value,
                };
                let outcome = self.ledger.update(id, field, &value);
                report(out, &outcome, self.ledger.len())?;
            }
            Command::List => writeln!(out, "{}", render_ledger(&self.ledger, self.config.credits_hint))?,
            Command::Grades => writeln!(out, "{}", render_grade_table())?,
            Command::Json => {
                let json = to_string_pretty(&self.ledger.snapshot()).context("Failed to serialize the ledger")?;
                writeln!(out, "{}", json)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }
}

// Prints the confirmation, if any, followed by the summary line.
fn report<W: Write>(out: &mut W, outcome: &Outcome, course_count: usize) -> Result<()> {
    if let Some(notice) = outcome.notice {
        writeln!(out, "{}", notice)?;
    }
    writeln!(out, "{}", render_summary(&outcome.summary, course_count))?;
    Ok(())
}

// Comma-separated list of accepted grades.
fn grade_keys() -> String {
    GradeTable::entries().map(|(grade, _)| grade).collect::<Vec<_>>().join(", ")
}

// One-line CGPA summary shown after every change.
pub fn render_summary(summary: &Summary, course_count: usize) -> String {
    format!(
        "CGPA {:.2} ({}) | eligible {}/{} | credits {:.2}",
        summary.current_average, summary.standing, summary.eligible_count, course_count, summary.total_credits
    )
}

// Table of all rows followed by the summary line.
pub fn render_ledger(ledger: &CourseLedger, credits_hint: f64) -> String {
    let mut table = format!("{:>4} | {:<24} | {:<5} | credits (0-{})\n", "id", "name", "grade", credits_hint);
    for course in ledger.courses() {
        let grade = if course.grade.is_empty() { "-" } else { course.grade.as_str() };
        table.push_str(&format!("{:>4} | {:<24} | {:<5} | {:>7.2}\n", course.id, course.name, grade, course.credits));
    }
    table += &render_summary(&ledger.summary(), ledger.len());
    table
}

// Reference listing of the grade scale.
pub fn render_grade_table() -> String {
    let mut listing = String::from("Grade | Points\n");
    for (grade, points) in GradeTable::entries() {
        listing.push_str(&format!("{:<5} | {:.1}\n", grade, points));
    }
    listing.trim_end().to_string()
}
