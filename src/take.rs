use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::api::QuizSubmission;
use crate::intake::{run_intake, Identity};
use crate::output::{format_dashboard, format_number};
use crate::quiz::{Language, Likert, QuizFlow, Step, QUESTION_COUNT};
use crate::scoring::{score_responses, QuizResults};
use crate::storage::{self, IdentityRecord, KeyValueStore, ProgressRecord};
use crate::sync::SyncAgent;

/// One line of input during the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Answer(Likert),
    Keep,
    Previous,
    ToggleLanguage,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "" => Command::Keep,
        "p" | "prev" | "previous" => Command::Previous,
        "l" | "lang" => Command::ToggleLanguage,
        "q" | "quit" => Command::Quit,
        other => {
            let mut chars = other.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Command::Unknown;
            };
            // Accept Persian digits as well as ASCII ones
            let digit = match c {
                '۰'..='۹' => Some(c as u32 - '۰' as u32),
                _ => c.to_digit(10),
            };
            digit
                .and_then(|d| Likert::new(d as u8))
                .map(Command::Answer)
                .unwrap_or(Command::Unknown)
        }
    }
}

/// Read one line, None at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}

fn render_question<W: Write>(output: &mut W, flow: &QuizFlow, lang: Language) -> Result<()> {
    let number = format_number(flow.current_index() + 1, lang);
    let total = format_number(QUESTION_COUNT, lang);
    writeln!(output)?;
    match lang {
        Language::En => writeln!(output, "Question {} of {}", number, total)?,
        Language::Fa => writeln!(output, "سوال {} از {}", number, total)?,
    }
    writeln!(output, "{}", flow.current_question().text_for(lang))?;
    writeln!(
        output,
        "{}",
        lang.pick(
            "Please indicate how much this statement aligns with your personality:",
            "لطفاً مشخص کنید که این جمله چقدر با شخصیت شما همخوانی دارد:"
        )
    )?;

    let selected = flow.selected();
    for option in Likert::options() {
        let marker = if selected == Some(option) { "(•)" } else { "( )" };
        writeln!(
            output,
            "  {} {}. {}",
            marker,
            format_number(option.value(), lang),
            option.label(lang)
        )?;
    }
    write!(
        output,
        "{} ",
        lang.pick(
            "[1-5] answer, Enter keep, p previous, l language, q quit >",
            "[۱-۵] پاسخ، Enter ادامه، p قبلی، l زبان، q خروج >"
        )
    )?;
    output.flush().context("Failed to flush output")?;
    Ok(())
}

/// Write local progress and mirror it remotely. Local write failures are only logged.
fn persist(store: &dyn KeyValueStore, agent: &mut SyncAgent, flow: &QuizFlow) {
    let record = ProgressRecord::new(
        flow.current_index(),
        flow.responses().clone(),
        agent.session_id().map(str::to_string),
    );
    if let Err(e) = storage::save_progress(store, &record) {
        tracing::warn!(error = %e, "failed to save progress locally");
    }
    agent.save_progress(flow.current_index(), flow.responses());
}

/// Saved identity, or a fresh one from the intake form
async fn identify<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    store: &dyn KeyValueStore,
    agent: &SyncAgent,
    lang: Language,
) -> Result<IdentityRecord> {
    if let Some(record) = storage::load_identity(store) {
        tracing::debug!("using saved identity");
        return Ok(record);
    }

    let identity = run_intake(input, output, lang)?;
    let registered_id = agent.register_identity(&identity).await;
    let record = IdentityRecord::new(identity, registered_id);
    if let Err(e) = storage::save_identity(store, &record) {
        tracing::warn!(error = %e, "failed to save identity locally");
    }
    Ok(record)
}

/// Local progress wins; server progress is only taken when nothing is saved
/// here and the server resumed a session that already has answers.
async fn restore_flow(
    store: &dyn KeyValueStore,
    agent: &mut SyncAgent,
    identity: &Identity,
    lang: Language,
) -> Option<QuizFlow> {
    let local = storage::load_progress(store);

    if let Some(session_id) = local.as_ref().and_then(|p| p.session_id.clone()) {
        agent.adopt_session(session_id);
    } else if let Some(session) = agent.start_session(identity, lang).await {
        if local.is_none() && session.is_resuming && !session.responses.is_empty() {
            tracing::debug!(
                current = session.current_question,
                answered = session.total_questions_answered,
                "resuming from server progress"
            );
            return Some(QuizFlow::resume(session.current_question, session.responses));
        }
    }

    local.map(|p| QuizFlow::resume(p.current_question, p.responses))
}

fn user_id_for(record: &IdentityRecord) -> String {
    record
        .submission_id
        .clone()
        .unwrap_or_else(|| record.identity.mobile_number.clone())
}

/// How a quiz run ended
#[derive(Debug, Clone, PartialEq)]
pub struct TakeOutcome {
    /// None when the user quit (or input ended) with progress saved
    pub results: Option<QuizResults>,
    /// Language in effect at the end, after any toggles
    pub language: Language,
}

/// Run the interactive quiz until the last question is answered or the user
/// leaves.
pub async fn run_take<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    store: &dyn KeyValueStore,
    agent: &mut SyncAgent,
    language: Language,
    use_colors: bool,
) -> Result<TakeOutcome> {
    let mut lang = language;

    let identity = identify(input, output, store, agent, lang).await?;
    let mut flow = match restore_flow(store, agent, &identity.identity, lang).await {
        Some(flow) => {
            let number = format_number(flow.current_index() + 1, lang);
            match lang {
                Language::En => writeln!(output, "Welcome back! Continuing from question {}.", number)?,
                Language::Fa => writeln!(output, "خوش برگشتید! ادامه از سوال {}.", number)?,
            }
            flow
        }
        None => QuizFlow::new(),
    };

    loop {
        render_question(output, &flow, lang)?;
        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            persist(store, agent, &flow);
            return Ok(TakeOutcome {
                results: None,
                language: lang,
            });
        };

        match parse_command(&line) {
            Command::Answer(value) => {
                if flow.answer(value) == Step::Completed {
                    break;
                }
                persist(store, agent, &flow);
            }
            Command::Keep => match flow.selected() {
                Some(value) => {
                    if flow.answer(value) == Step::Completed {
                        break;
                    }
                    persist(store, agent, &flow);
                }
                None => writeln!(
                    output,
                    "{}",
                    lang.pick("Please choose an answer.", "لطفاً یک گزینه را انتخاب کنید.")
                )?,
            },
            Command::Previous => {
                if flow.previous() {
                    persist(store, agent, &flow);
                } else {
                    writeln!(
                        output,
                        "{}",
                        lang.pick("This is the first question.", "این اولین سوال است.")
                    )?;
                }
            }
            Command::ToggleLanguage => {
                lang = lang.toggle();
                if let Err(e) = storage::save_language(store, lang) {
                    tracing::warn!(error = %e, "failed to save language");
                }
            }
            Command::Quit => {
                persist(store, agent, &flow);
                writeln!(
                    output,
                    "{}",
                    lang.pick(
                        "Progress saved. Run the quiz again to continue.",
                        "پیشرفت شما ذخیره شد. برای ادامه دوباره آزمون را اجرا کنید."
                    )
                )?;
                return Ok(TakeOutcome {
                    results: None,
                    language: lang,
                });
            }
            Command::Unknown => writeln!(
                output,
                "{}",
                lang.pick(
                    "Enter a number from 1 to 5, or p, l, q.",
                    "عددی از ۱ تا ۵ یا یکی از p، l، q را وارد کنید."
                )
            )?,
        }
    }

    if !flow.is_complete() {
        // Resumed progress can skip questions; unanswered ones score nothing
        tracing::debug!(
            answered = flow.answered_count(),
            total = QUESTION_COUNT,
            "finishing with unanswered questions"
        );
    }

    let results = score_responses(flow.responses());
    if let Err(e) = storage::clear_progress(store) {
        tracing::warn!(error = %e, "failed to clear saved progress");
    }

    writeln!(output)?;
    writeln!(output, "{}", format_dashboard(&results, lang, use_colors))?;

    if let Some(submission) = QuizSubmission::new(
        user_id_for(&identity),
        &identity.identity,
        flow.responses(),
        &results,
        lang,
    ) {
        agent.submit_results(submission);
    }
    agent.complete_session();

    Ok(TakeOutcome {
        results: Some(results),
        language: lang,
    })
}
