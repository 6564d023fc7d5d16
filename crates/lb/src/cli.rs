/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lb")]
#[command(author, version, about = "Bind JSON data to HTML templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bind data to a template and print the resulting document
    Render {
        /// Path to the XHTML template
        template: PathBuf,

        /// Data to bind, JSON or YAML (an empty object when omitted)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Directory of language property files, enables i18n filtering
        #[arg(long)]
        locale_dir: Option<PathBuf>,

        /// Language code (defaults to the root element's lang, then the locale)
        #[arg(short, long)]
        lang: Option<String>,

        /// Add clones of the template element with this id instead of binding
        /// the whole document
        #[arg(long)]
        id: Option<String>,

        /// Engine configuration, YAML or JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the language codes of a directory of property files
    Codes {
        /// Directory of language property files
        locale_dir: PathBuf,

        /// Print the stored code this language resolves to instead
        #[arg(short, long)]
        lang: Option<String>,
    },
}
