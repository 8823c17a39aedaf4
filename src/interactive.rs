//! Line-oriented front end for the wizard.
//!
//! Reads one command per line from any `BufRead` and writes prompts and
//! tables to any `Write`, so the whole flow can be scripted in tests.

use crate::commands::deliver_exports;
use crate::render::{render_board, render_framing, render_legend, render_summary};
use root_cause::config::ExportConfig;
use root_cause::error::AppError;
use root_cause::workflows::framing::SystemFraming;
use root_cause::workflows::rca::{
    CandidateId, EvaluationDialog, EvaluationReport, EvaluationSession, ExportFormat, Rating,
    RatingDimension, SortOutcome, SortRequest, Wizard, WizardStep,
};
use std::io::{self, BufRead, Write};
use tracing::debug;

const BRAINSTORM_HELP: &str = "\
Commands:
  add <text>          add a root cause
  edit <n> <text>     rename root cause n
  rm <n>              remove root cause n
  list                show the list
  frame               edit the system framing
  next                continue to evaluation
  quit                leave the wizard";

const EVALUATION_HELP: &str = "\
Commands:
  show                show the evaluation table
  title <text>        rename the evaluation
  rate <n> <L> <I> <C>  rate root cause n (N, S, V or - to clear), e.g. rate 2 S V V
  set <n> <dim> <r>   set one rating, e.g. set 2 impact V
  add <text>          add a root cause
  rename <n> <text>   rename root cause n
  note <n> <text>     replace the notes of root cause n
  rm <n>              remove root cause n
  dir                 toggle the sort direction
  sort                sort by score
  export [csv|md|json|all]  export in the current order
  legend              show the scoring legend
  framing             show or hide the framing summary
  frame               edit the system framing
  quit                leave the wizard";

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(trimmed))
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}> ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn ask(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .map(|answer| {
                let answer = answer.trim();
                answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
            })
            .unwrap_or(false))
    }

    fn say(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

pub struct InteractiveWizard<R, W> {
    console: Console<R, W>,
    wizard: Wizard,
    export: ExportConfig,
}

impl<R: BufRead, W: Write> InteractiveWizard<R, W> {
    pub fn new(input: R, output: W, wizard: Wizard, export: ExportConfig) -> Self {
        Self {
            console: Console { input, output },
            wizard,
            export,
        }
    }

    pub fn into_parts(self) -> (Wizard, W) {
        (self.wizard, self.console.output)
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            let keep_going = match self.wizard.step() {
                WizardStep::Framing => self.framing_step()?,
                WizardStep::Brainstorm => self.brainstorm_step()?,
                WizardStep::Evaluation => self.evaluation_step()?,
            };
            if !keep_going {
                break;
            }
        }
        self.console.say("Goodbye.")?;
        Ok(())
    }

    fn framing_step(&mut self) -> Result<bool, AppError> {
        self.console.say(format!("== {} ==", WizardStep::Framing.label()))?;
        let current = self.wizard.draft_mut().clone();

        let Some(system_name) = self
            .console
            .prompt(&with_current("System name", &current.system_name))?
        else {
            return Ok(false);
        };
        let Some(optimal_outcome) = self
            .console
            .prompt(&with_current("Optimal outcome", &current.optimal_outcome))?
        else {
            return Ok(false);
        };

        self.console
            .say("Insufficient outcomes, one per line. Blank line to finish.")?;
        let mut insufficient = Vec::new();
        loop {
            let Some(line) = self.console.prompt("-")? else {
                return Ok(false);
            };
            if line.trim().is_empty() {
                break;
            }
            insufficient.push(line);
        }

        let draft = self.wizard.draft_mut();
        if !system_name.trim().is_empty() {
            draft.system_name = system_name;
        }
        if !optimal_outcome.trim().is_empty() {
            draft.optimal_outcome = optimal_outcome;
        }
        if !insufficient.is_empty() {
            draft.insufficient_raw = insufficient.join("\n");
        }

        if self.wizard.submit_framing() {
            if self.wizard.step() == WizardStep::Brainstorm {
                self.console.say(format!(
                    "== {} ==\nList possible root causes. Type help for commands.",
                    WizardStep::Brainstorm.label()
                ))?;
            }
        } else {
            self.console.say(
                "System name, optimal outcome and at least one insufficient outcome are required.",
            )?;
        }
        Ok(true)
    }

    fn brainstorm_step(&mut self) -> Result<bool, AppError> {
        let Some(line) = self.console.prompt("brainstorm")? else {
            return Ok(false);
        };
        let (command, rest) = split_command(&line);

        match command.as_str() {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "help" => self.console.say(BRAINSTORM_HELP)?,
            "list" => render_board(&mut self.console.output, self.wizard.board())?,
            "add" => match self.wizard.board_mut().add(rest) {
                Some(_) => render_board(&mut self.console.output, self.wizard.board())?,
                None => self.console.say("Nothing to add.")?,
            },
            "edit" => {
                let board = self.wizard.board_mut();
                let renamed = match position_and_rest(rest) {
                    Some((position, text)) => match board.id_at(position) {
                        Some(id) => {
                            board.begin_edit(id);
                            board.set_edit_draft(text);
                            let committed = board.commit_edit();
                            board.cancel_edit();
                            committed
                        }
                        None => false,
                    },
                    None => false,
                };
                if renamed {
                    render_board(&mut self.console.output, self.wizard.board())?;
                } else {
                    self.console.say("Usage: edit <n> <new name>")?;
                }
            }
            "rm" | "remove" => {
                let board = self.wizard.board_mut();
                let removed = parse_position(rest)
                    .and_then(|position| board.id_at(position))
                    .map(|id| board.remove(id))
                    .unwrap_or(false);
                if removed {
                    render_board(&mut self.console.output, self.wizard.board())?;
                } else {
                    self.console.say("Usage: rm <n>")?;
                }
            }
            "frame" => self.wizard.edit_framing(),
            "next" | "done" => {
                if self.wizard.continue_to_evaluation() {
                    self.console.say(format!(
                        "== {} ==\nRate each root cause. Type help for commands.",
                        WizardStep::Evaluation.label()
                    ))?;
                    self.show()?;
                } else {
                    self.console.say("Add at least one root cause first.")?;
                }
            }
            _ => self.console.say("Unknown command. Type help.")?,
        }
        Ok(true)
    }

    fn evaluation_step(&mut self) -> Result<bool, AppError> {
        self.settle_completion()?;

        let Some(line) = self.console.prompt("evaluate")? else {
            return Ok(false);
        };
        let (command, rest) = split_command(&line);
        debug!(command = %command, "evaluation command");

        match command.as_str() {
            "" => {}
            "quit" | "exit" => return Ok(false),
            "help" => self.console.say(EVALUATION_HELP)?,
            "show" | "list" => self.show()?,
            "legend" => render_legend(&mut self.console.output, &EvaluationReport::legend())?,
            "framing" => {
                let summary = self.wizard.summary_mut();
                summary.toggle();
                let label = summary.toggle_label();
                match (self.wizard.summary().is_open(), self.wizard.framing()) {
                    (true, Some(framing)) => render_framing(&mut self.console.output, framing)?,
                    _ => self.console.say("Framing hidden.")?,
                }
                self.console.say(format!("[{label}: type framing]"))?;
            }
            "frame" => self.wizard.edit_framing(),
            "title" => {
                if rest.is_empty() {
                    let current = format!("Title: {}", self.wizard.title());
                    self.console.say(current)?;
                } else if self.wizard.set_title(rest) {
                    self.show()?;
                }
            }
            "export" => self.export(rest)?,
            _ => {
                let Some(session) = self.wizard.evaluation_mut() else {
                    return Ok(false);
                };
                let handled = evaluate(&mut self.console, session, &command, rest)?;
                if handled {
                    self.show()?;
                }
            }
        }
        Ok(true)
    }

    /// Answers the completion prompt if the last edit finished the evaluation.
    fn settle_completion(&mut self) -> Result<(), AppError> {
        let Some(session) = self.wizard.evaluation_mut() else {
            return Ok(());
        };
        if session.dialog() != EvaluationDialog::CompletionPrompt {
            return Ok(());
        }

        if self
            .console
            .ask("Evaluation completed. Would you like to sort your results?")?
        {
            if let Some(outcome) = session.confirm_sort() {
                report_sort(&mut self.console, session, &outcome)?;
            }
            self.show()?;
        } else {
            session.dismiss_prompts();
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), AppError> {
        let framing: Option<SystemFraming> = if self.wizard.summary().is_open() {
            self.wizard.framing().cloned()
        } else {
            None
        };
        if let Some(framing) = &framing {
            render_framing(&mut self.console.output, framing)?;
            writeln!(self.console.output)?;
        }

        let title = self.wizard.title();
        if let Some(session) = self.wizard.evaluation() {
            let summary = EvaluationReport::from_session(title, session);
            render_summary(&mut self.console.output, &summary)?;
        }
        Ok(())
    }

    fn export(&mut self, rest: &str) -> Result<(), AppError> {
        let formats = if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
            ExportFormat::ordered().to_vec()
        } else {
            match ExportFormat::parse(rest) {
                Some(format) => vec![format],
                None => {
                    self.console
                        .say(format!("Unknown export format '{rest}'. Use csv, md, json or all."))?;
                    return Ok(());
                }
            }
        };

        let title = self.wizard.title();
        if let Some(session) = self.wizard.evaluation() {
            deliver_exports(
                &mut self.console.output,
                &self.export,
                title,
                session.candidates(),
                &formats,
            )?;
        }
        Ok(())
    }
}

/// Applies one editing or sorting command. `false` when nothing changed.
fn evaluate<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut EvaluationSession,
    command: &str,
    rest: &str,
) -> Result<bool, AppError> {
    match command {
        "add" => match session.add_candidate(rest) {
            Some(_) => Ok(true),
            None => {
                console.say("Nothing to add.")?;
                Ok(false)
            }
        },
        "rm" | "remove" => {
            let removed = parse_position(rest)
                .and_then(|position| session.id_at(position))
                .map(|id| session.remove(id))
                .unwrap_or(false);
            usage_unless(console, removed, "Usage: rm <n>")
        }
        "rename" => {
            let renamed = position_and_rest(rest)
                .and_then(|(position, text)| session.id_at(position).map(|id| (id, text)))
                .map(|(id, text)| session.rename(id, text))
                .unwrap_or(false);
            usage_unless(console, renamed, "Usage: rename <n> <new name> (name cannot be empty)")
        }
        "note" | "notes" => {
            let noted = match split_position(rest) {
                Some((position, text)) => session
                    .id_at(position)
                    .map(|id| session.set_notes(id, text))
                    .unwrap_or(false),
                None => false,
            };
            usage_unless(console, noted, "Usage: note <n> <text>")
        }
        "rate" => {
            let rated = match split_position(rest) {
                Some((position, ratings)) => {
                    match (session.id_at(position), parse_triple(ratings)) {
                        (Some(id), Some(triple)) => {
                            let dimensions = RatingDimension::ordered().into_iter();
                            for (dimension, rating) in dimensions.zip(triple) {
                                apply_rating(session, id, dimension, rating);
                            }
                            true
                        }
                        _ => false,
                    }
                }
                None => false,
            };
            usage_unless(console, rated, "Usage: rate <n> <L> <I> <C> with N, S, V or -")
        }
        "set" => {
            let set = match split_position(rest) {
                Some((position, tail)) => {
                    let mut parts = tail.split_whitespace();
                    let dimension = parts.next().and_then(RatingDimension::parse);
                    let rating = parts.next().and_then(parse_rating_token);
                    match (session.id_at(position), dimension, rating, parts.next()) {
                        (Some(id), Some(dimension), Some(rating), None) => {
                            apply_rating(session, id, dimension, rating);
                            true
                        }
                        _ => false,
                    }
                }
                None => false,
            };
            usage_unless(
                console,
                set,
                "Usage: set <n> <likelihood|impact|controllability> <N|S|V|->",
            )
        }
        "dir" => {
            let direction = session.toggle_direction();
            console.say(format!("Sort direction: {}", direction.label()))?;
            Ok(false)
        }
        "sort" => {
            match session.request_sort() {
                SortRequest::Sorted(outcome) => report_sort(console, session, &outcome)?,
                SortRequest::NeedsConfirmation { incomplete } => {
                    let question = format!(
                        "Not all root causes have been evaluated ({incomplete} incomplete). \
                         Sort anyway?"
                    );
                    if console.ask(&question)? {
                        if let Some(outcome) = session.confirm_sort() {
                            report_sort(console, session, &outcome)?;
                        }
                    } else {
                        session.dismiss_prompts();
                        console.say("Sort cancelled.")?;
                        return Ok(false);
                    }
                }
            }
            Ok(true)
        }
        _ => {
            console.say("Unknown command. Type help.")?;
            Ok(false)
        }
    }
}

fn apply_rating(
    session: &mut EvaluationSession,
    id: CandidateId,
    dimension: RatingDimension,
    rating: Option<Rating>,
) {
    match rating {
        Some(rating) => session.rate(id, dimension, rating),
        None => session.clear_rating(id, dimension),
    };
}

fn report_sort<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &EvaluationSession,
    outcome: &SortOutcome,
) -> io::Result<()> {
    console.say(format!("Sorted {}.", outcome.direction.label()))?;
    for attention in &outcome.attention {
        let position = session
            .candidates()
            .iter()
            .position(|candidate| candidate.id() == attention.id)
            .map(|index| index + 1)
            .unwrap_or_default();
        let name = session
            .get(attention.id)
            .map(|candidate| candidate.display_name())
            .unwrap_or_default();
        let missing: Vec<_> = attention
            .missing
            .iter()
            .map(|dimension| dimension.label())
            .collect();
        console.say(format!(
            "Needs attention: #{position} {name} (missing {})",
            missing.join(", ")
        ))?;
    }
    Ok(())
}

fn usage_unless<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    done: bool,
    usage: &str,
) -> Result<bool, AppError> {
    if !done {
        console.say(usage)?;
    }
    Ok(done)
}

fn with_current(label: &str, current: &str) -> String {
    if current.trim().is_empty() {
        label.to_string()
    } else {
        format!("{label} [{current}]")
    }
}

fn split_command(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_ascii_lowercase(), rest.trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}

fn parse_position(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

/// `"3 some text"` into `(3, "some text")`; the text may be empty.
fn split_position(raw: &str) -> Option<(usize, &str)> {
    let raw = raw.trim();
    match raw.split_once(char::is_whitespace) {
        Some((position, rest)) => Some((parse_position(position)?, rest.trim())),
        None => Some((parse_position(raw)?, "")),
    }
}

fn position_and_rest(raw: &str) -> Option<(usize, &str)> {
    split_position(raw).filter(|(_, rest)| !rest.is_empty())
}

/// `-` clears a rating.
fn parse_rating_token(raw: &str) -> Option<Option<Rating>> {
    if raw.trim() == "-" {
        return Some(None);
    }
    Rating::parse(raw).map(Some)
}

/// Three tokens (`S V V`) or one compact token (`SVV`).
fn parse_triple(raw: &str) -> Option<[Option<Rating>; 3]> {
    let tokens: Vec<String> = match raw.split_whitespace().collect::<Vec<_>>().as_slice() {
        [compact] if compact.chars().count() == 3 => {
            compact.chars().map(|c| c.to_string()).collect()
        }
        tokens => tokens.iter().map(|token| token.to_string()).collect(),
    };
    if tokens.len() != 3 {
        return None;
    }
    Some([
        parse_rating_token(&tokens[0])?,
        parse_rating_token(&tokens[1])?,
        parse_rating_token(&tokens[2])?,
    ])
}
