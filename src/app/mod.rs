use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::AiClient;
use crate::coaching::{Coach, Transcript};
use crate::config::TangiraConfig;
use crate::shaping::{Gig, GigProposal, Language, TaskShaper};

/// Words that end an interactive chat
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Demo front-end wiring the adapters to a terminal
pub struct Application {
    config: TangiraConfig,
    shaper: TaskShaper,
    coach: Coach,
}

impl Application {
    pub fn new(config: TangiraConfig) -> Result<Self> {
        let client = Arc::new(
            AiClient::from_config(&config.ai_config()).context("Failed to build AI client")?,
        );
        if client.is_configured() {
            tracing::info!(model = client.model(), "AI client ready");
        }
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: TangiraConfig, client: Arc<AiClient>) -> Self {
        Self {
            config,
            shaper: TaskShaper::new(client.clone()),
            coach: Coach::new(client),
        }
    }

    pub fn shaper(&self) -> &TaskShaper {
        &self.shaper
    }

    pub fn coach(&self) -> &Coach {
        &self.coach
    }

    /// Shape a description and render the result, optionally posting it.
    pub async fn shape(&self, description: &str, language: Language, post: bool) -> String {
        let proposals = self.shaper.shape_task(description, language).await;
        if proposals.is_empty() {
            return "No gig suggestions could be generated. Try rephrasing or adding more detail.\n"
                .to_string();
        }

        if post {
            let gigs: Vec<Gig> = proposals
                .into_iter()
                .map(|proposal| proposal.post(&self.config.sme_name))
                .collect();
            tracing::info!(count = gigs.len(), sme = %self.config.sme_name, "posted gigs");
            render_gigs(&gigs)
        } else {
            render_proposals(&proposals)
        }
    }

    pub async fn ask(&self, message: &str) -> String {
        self.coach.coach(message).await
    }

    /// Interactive coaching loop until EOF or an exit word.
    pub async fn chat<R, W>(&self, learner_name: &str, input: R, mut output: W) -> Result<Transcript>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut transcript = Transcript::with_greeting(learner_name);
        if let Some(greeting) = transcript.last() {
            output.write_all(format!("coach> {}\n", greeting.text).as_bytes()).await?;
        }

        let mut lines = input.lines();
        loop {
            output.write_all(b"you> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if EXIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
                break;
            }
            // Same as a disabled send button: blank input never reaches the coach
            if line.is_empty() {
                continue;
            }

            let reply = self.coach.respond(&mut transcript, line).await;
            output.write_all(format!("coach> {}\n", reply.text).as_bytes()).await?;
        }

        output.flush().await?;
        Ok(transcript)
    }

    pub fn describe_config(&self) -> Result<String> {
        let path = TangiraConfig::config_file_path()?;
        let body = toml::to_string_pretty(&self.config.redacted())?;
        Ok(format!("# {}\n{}", path.display(), body))
    }
}

fn render_proposals(proposals: &[GigProposal]) -> String {
    let mut out = String::new();
    for (index, p) in proposals.iter().enumerate() {
        let _ = writeln!(out, "{}. {} [{}] ${:.2}, {}", index + 1, p.title, p.difficulty, p.budget, p.duration);
        let _ = writeln!(out, "   {}", p.description);
        let _ = writeln!(out, "   skills: {}", p.skills.join(", "));
    }
    out
}

fn render_gigs(gigs: &[Gig]) -> String {
    let mut out = String::new();
    for gig in gigs {
        let _ = writeln!(
            out,
            "Gig \"{}\" approved and posted to marketplace by {} (id {})",
            gig.title, gig.posted_by, gig.id
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AiConfig;
    use crate::coaching::{Sender, CONNECTIVITY_FALLBACK};
    use crate::providers::testing::ScriptedProvider;
    use serde_json::json;

    fn app_replying(text: &str) -> (Application, Arc<ScriptedProvider>) {
        let provider = Arc::new(ScriptedProvider::replying(text));
        let ai = AiConfig {
            api_key: Some("test-key".to_string()),
            ..AiConfig::default()
        };
        let client = Arc::new(AiClient::new(&ai, provider.clone()));
        (Application::with_client(TangiraConfig::default(), client), provider)
    }

    fn gigs_json() -> String {
        json!([{
            "title": "Transcribe 10min Audio",
            "description": "English to Shona transcription.",
            "budget": 5,
            "skills": ["Transcription", "Shona"],
            "duration": "1h",
            "difficulty": "Beginner"
        }])
        .to_string()
    }

    #[tokio::test]
    async fn test_shape_renders_proposals() {
        let (app, _) = app_replying(&gigs_json());
        let out = app.shape("Need an interview transcribed", Language::Shona, false).await;

        assert!(out.starts_with("1. Transcribe 10min Audio [Beginner] $5.00, 1h"));
        assert!(out.contains("skills: Transcription, Shona"));
    }

    #[tokio::test]
    async fn test_shape_with_post_uses_configured_sme() {
        let (app, _) = app_replying(&gigs_json());
        let out = app.shape("Need an interview transcribed", Language::English, true).await;

        assert!(out.contains("approved and posted to marketplace by Harare Fresh Veggies"));
    }

    #[tokio::test]
    async fn test_shape_failure_asks_to_rephrase() {
        let (app, _) = app_replying("not json");
        let out = app.shape("Something", Language::English, false).await;
        assert!(out.contains("Try rephrasing"));
    }

    #[tokio::test]
    async fn test_chat_skips_blank_lines_and_stops_on_exit() {
        let (app, provider) = app_replying("Use a pivot table.");
        let input: &[u8] = b"How do I summarise sales?\n\n   \nexit\nnever read\n";
        let mut output: Vec<u8> = Vec::new();

        let transcript = app.chat("Tendai", input, &mut output).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].sender, Sender::User);

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with("coach> Mhoro Tendai!"));
        assert!(printed.contains("coach> Use a pivot table."));
    }

    #[tokio::test]
    async fn test_chat_ends_at_eof() {
        let (app, _) = app_replying("Sure.");
        let input: &[u8] = b"hello";
        let transcript = app.chat("Rudo", input, Vec::new()).await.unwrap();
        assert_eq!(transcript.len(), 3);
    }

    #[tokio::test]
    async fn test_shaping_and_coaching_run_concurrently() {
        let provider = Arc::new(ScriptedProvider::failing(crate::error::AiError::Transport(
            "offline".to_string(),
        )));
        let ai = AiConfig {
            api_key: Some("test-key".to_string()),
            ..AiConfig::default()
        };
        let client = Arc::new(AiClient::new(&ai, provider.clone()));
        let app = Application::with_client(TangiraConfig::default(), client);

        let (proposals, reply) = tokio::join!(
            app.shaper().shape_task("Design a flyer", Language::English),
            app.coach().coach("Any tips?"),
        );

        assert!(proposals.is_empty());
        assert_eq!(reply, CONNECTIVITY_FALLBACK);
        assert_eq!(provider.call_count(), 2);
    }
}
