//! Interactive console front end
//!
//! The session talks to an [`Assistant`]: either the pipeline in this
//! process or a remote `/ask` endpoint. Both return the labeled answer.

use async_trait::async_trait;
use rust_i18n::t;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::services::{
    AnswerPipeline, RemoteAskClient, RemoteError, Transcript, classify, format_answer,
};

/// Outcome of one question, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Answered(String),
    Failed(String),
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn ask(&self, question: &str) -> Reply;
}

/// Calls the pipeline directly.
pub struct LocalAssistant {
    pipeline: Arc<AnswerPipeline>,
}

impl LocalAssistant {
    pub fn new(pipeline: Arc<AnswerPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl Assistant for LocalAssistant {
    async fn ask(&self, question: &str) -> Reply {
        match self.pipeline.run(question).await {
            Ok(answer) => Reply::Answered(answer.formatted()),
            Err(failure) => Reply::Failed(failure.formatted()),
        }
    }
}

/// Forwards to a running server; labels are applied here from the returned language.
///
/// An `error` reported by the server reads like a local generation failure;
/// only transport problems are shown as a failed request.
pub struct RemoteAssistant {
    client: RemoteAskClient,
}

impl RemoteAssistant {
    pub fn new(client: RemoteAskClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Assistant for RemoteAssistant {
    async fn ask(&self, question: &str) -> Reply {
        match self.client.ask(question).await {
            Ok(resp) => Reply::Answered(format_answer(
                resp.language,
                resp.answer.as_deref().unwrap_or_default(),
            )),
            Err(RemoteError::Backend(message)) => {
                let locale = classify(question).locale();
                Reply::Failed(t!("answer.error", locale = locale, message = message).to_string())
            },
            Err(RemoteError::Request(message)) => {
                let locale = classify(question).locale();
                Reply::Failed(
                    t!("chat.request_failed", locale = locale, message = message).to_string(),
                )
            },
        }
    }
}

/// Shown instead of calling the assistant when the question is blank.
pub fn empty_query_warning() -> String {
    t!("chat.empty_query", locale = "en").to_string()
}

const HISTORY_COMMAND: &str = ":history";
const QUIT_COMMAND: &str = ":quit";

/// One console conversation with its own transcript.
pub struct ChatSession<A> {
    assistant: A,
    transcript: Transcript,
}

impl<A: Assistant> ChatSession<A> {
    pub fn new(assistant: A) -> Self {
        Self { assistant, transcript: Transcript::new() }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Handle one line of input. Returns `None` when the session should end.
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let question = line.trim();
        match question {
            QUIT_COMMAND => None,
            HISTORY_COMMAND => Some(self.render_history()),
            "" => Some(empty_query_warning()),
            _ => Some(match self.assistant.ask(question).await {
                Reply::Answered(answer) => {
                    self.transcript.record(question, answer.clone());
                    answer
                },
                Reply::Failed(message) => message,
            }),
        }
    }

    fn render_history(&self) -> String {
        let mut out = vec![t!("chat.history", locale = "en").to_string()];
        for entry in self.transcript.newest_first() {
            out.push(format!("{} {}", t!("chat.you", locale = "en"), entry.question));
            out.push(format!("🤖 {}", entry.answer));
            out.push("---".to_string());
        }
        out.join("\n")
    }

    /// Read questions from stdin until EOF or `:quit`.
    pub async fn run_stdio(&mut self) -> anyhow::Result<()> {
        let stdout = tokio::io::stdout();
        self.run(BufReader::new(tokio::io::stdin()), stdout).await
    }

    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: tokio::io::AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        writer
            .write_all(
                "💬 Ask your health question in English or தமிழ் (:history, :quit)\n> ".as_bytes(),
            )
            .await?;
        writer.flush().await?;

        while let Some(line) = lines.next_line().await? {
            match self.handle_line(&line).await {
                Some(output) => {
                    writer.write_all(format!("{}\n> ", output).as_bytes()).await?;
                    writer.flush().await?;
                },
                None => break,
            }
        }
        Ok(())
    }
}
