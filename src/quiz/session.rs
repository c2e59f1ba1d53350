use std::fmt;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::quiz::{Problem, ProblemSet};

/// What to do with the question in flight when the input stream closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfInput {
    /// Leave the question unanswered until the time budget runs out.
    #[default]
    WaitForTimer,
    /// Score the question (and every later one) as presented but incorrect.
    CountAsIncorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Expired,
    Completed,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every problem was answered before the budget ran out.
    Completed,
    /// The budget ran out first.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub correct: usize,
    /// Problems answered before the budget ran out.
    pub presented: usize,
    /// Problems in the set.
    pub total: usize,
    pub outcome: Outcome,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outcome == Outcome::Expired {
            write!(f, "Time's up! ")?;
        }
        write!(
            f,
            "You got {} out of {} correct!",
            self.correct, self.presented
        )?;
        if self.presented < self.total {
            write!(f, " ({} of {} questions reached)", self.presented, self.total)?;
        }
        Ok(())
    }
}

enum Reply {
    Line,
    Closed,
    TimedOut,
}

/// A single timed run over a problem set.
///
/// The time budget is one countdown started when [`QuizSession::run`] begins and
/// shared by every question. For each problem the pending line read races the
/// countdown; when the countdown wins, the read future is dropped and the
/// question in flight is not counted.
pub struct QuizSession<R, W> {
    problems: Vec<Problem>,
    budget: Duration,
    input: R,
    line: Vec<u8>,
    output: W,
    end_of_input: EndOfInput,
    state: SessionState,
    correct: usize,
    presented: usize,
}

impl<R, W> QuizSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(problems: impl Into<ProblemSet>, budget: Duration, input: R, output: W) -> Self {
        Self {
            problems: problems.into().into_inner(),
            budget,
            input,
            line: Vec::new(),
            output,
            end_of_input: EndOfInput::default(),
            state: SessionState::NotStarted,
            correct: 0,
            presented: 0,
        }
    }

    pub fn end_of_input(mut self, policy: EndOfInput) -> Self {
        self.end_of_input = policy;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the quiz to completion or expiry. A session can only run once.
    pub async fn run(&mut self) -> io::Result<Summary> {
        if self.state != SessionState::NotStarted {
            return Err(io::Error::other("quiz session has already been run"));
        }
        self.transition(SessionState::Running);

        let deadline = tokio::time::sleep(self.budget);
        tokio::pin!(deadline);

        let problems = std::mem::take(&mut self.problems);
        let mut input_closed = false;

        for (index, problem) in problems.iter().enumerate() {
            if deadline.is_elapsed() {
                break;
            }
            self.prompt(index, problem).await?;

            let reply = if input_closed {
                Reply::Closed
            } else {
                tokio::select! {
                    biased;
                    _ = &mut deadline => Reply::TimedOut,
                    read = self.input.read_until(b'\n', &mut self.line) => match read? {
                        0 => Reply::Closed,
                        _ => Reply::Line,
                    },
                }
            };

            match reply {
                Reply::TimedOut => break,
                Reply::Line => {
                    let answer = self.take_line();
                    self.presented += 1;
                    if problem.is_correct(&answer) {
                        self.correct += 1;
                    }
                    log::debug!("Problem #{}: answered {:?}", index + 1, answer.trim());
                }
                Reply::Closed => {
                    if !input_closed {
                        log::warn!("Input closed at problem #{}", index + 1);
                        input_closed = true;
                    }
                    match self.end_of_input {
                        EndOfInput::WaitForTimer => {
                            (&mut deadline).await;
                            break;
                        }
                        EndOfInput::CountAsIncorrect => self.presented += 1,
                    }
                }
            }
        }

        let outcome = if self.presented == problems.len() {
            self.transition(SessionState::Completed);
            Outcome::Completed
        } else {
            self.output.write_all(b"\n").await?;
            self.output.flush().await?;
            self.transition(SessionState::Expired);
            Outcome::Expired
        };

        let summary = Summary {
            correct: self.correct,
            presented: self.presented,
            total: problems.len(),
            outcome,
        };
        self.transition(SessionState::Finalized);
        Ok(summary)
    }

    /// Bytes that are not valid UTF-8 become replacement characters, so they
    /// never match an answer.
    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();
        line
    }

    async fn prompt(&mut self, index: usize, problem: &Problem) -> io::Result<()> {
        let line = format!("Problem #{}: {} = ", index + 1, problem.question);
        self.output.write_all(line.as_bytes()).await?;
        self.output.flush().await
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("Quiz session {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
