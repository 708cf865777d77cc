use clap::{Parser, Subcommand};

use crate::shaping::Language;

#[derive(Debug, Parser)]
#[command(name = "tangira", version, about = "AI task shaping and learner coaching for the Tangira marketplace")]
pub struct Cli {
    /// Override the model from the config file
    #[arg(long, global = true, env = "TANGIRA_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn a task description into 1-3 gig proposals
    Shape {
        description: String,

        /// Language the description is written in (English, Shona, Ndebele)
        #[arg(short, long, default_value_t = Language::English)]
        language: Language,

        /// Post the proposals as gigs under the configured SME name
        #[arg(long)]
        post: bool,
    },

    /// Ask the coach a single question
    Coach { message: String },

    /// Chat with the coach until `exit` or end of input
    Chat {
        #[arg(long, default_value = "Learner")]
        name: String,
    },

    /// Print the resolved configuration
    Config,
}
