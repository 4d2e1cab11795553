/*
** This file is a part of xmlsax (streaming SAX style XML tokenizer)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlsax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::io::stdin;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::info;

use xmlsax::Attributes;
use xmlsax::DebugHooks;
use xmlsax::EncodingTranscoder;
use xmlsax::ParserConfig;
use xmlsax::SaxError;
use xmlsax::SaxHandler;
use xmlsax::SaxParser;

/// Checks the well-formedness of XML documents.
#[derive(Parser, Debug)]
#[command(name = "saxlint", version, about)]
struct Args {
    /// Documents to check, standard input is read when none is given
    files: Vec<PathBuf>,

    /// Print overall statistics
    #[arg(short, long)]
    stat: bool,

    /// Print tag counts
    #[arg(short, long)]
    count: bool,

    /// Print every parse event
    #[arg(short, long)]
    events: bool,

    /// Trace the scanner
    #[arg(short, long)]
    debug: bool,
}

#[derive(Default)]
struct Handler {
    print_events: bool,
    level: usize,
    max_depth: usize,
    nr_tags: usize,
    nr_attributes: usize,
    nr_cdata_size: usize,
    nr_errors: usize,
    tag_map: BTreeMap<String, usize>,
}

impl Handler {
    fn new(print_events: bool) -> Self {
        Handler {
            print_events,
            ..Default::default()
        }
    }

    fn report(&self, do_stats: bool, do_tag_count: bool) {
        if do_stats {
            println!(
                "Tags: {}, attributes: {}, max depth: {}",
                self.nr_tags, self.nr_attributes, self.max_depth
            );
            println!(
                "Total size of character data: {} bytes.",
                self.nr_cdata_size
            );
        }
        if do_tag_count {
            println!("Tag counts:");
            for (tag, count) in self.tag_map.iter() {
                println!("  {}: {}", tag, count);
            }
        }
    }

    fn reset(&mut self) {
        *self = Handler::new(self.print_events);
    }
}

impl SaxHandler for Handler {
    fn start_element(&mut self, name: &str, attributes: &Attributes) {
        if self.print_events {
            print!("<{}", name);
            for (key, value) in attributes {
                print!(" {}='{}'", key, xmlsax::entities::escape(value));
            }
            println!(">");
        }
        self.nr_tags += 1;
        self.nr_attributes += attributes.len();
        self.level += 1;
        self.max_depth = self.max_depth.max(self.level);
        *self.tag_map.entry(name.to_string()).or_insert(0) += 1;
    }

    fn end_element(&mut self, name: &str) {
        if self.print_events {
            println!("</{}>", name);
        }
        self.level = self.level.saturating_sub(1);
    }

    fn characters(&mut self, text: &str) {
        if self.print_events {
            println!("{}", xmlsax::entities::escape(text));
        }
        self.nr_cdata_size += text.len();
    }

    fn error(&mut self, file_name: &str, line: usize, error: &SaxError) {
        eprintln!("{}:{}: {}", file_name, line, error);
        self.nr_errors += 1;
    }
}

struct Tracer;

impl DebugHooks for Tracer {
    fn debug_start(&mut self) {
        info!("scanner trace start");
    }

    fn debug_end(&mut self) {
        info!("scanner trace end");
    }
}

struct Linter {
    handler: Handler,
    parser: SaxParser,
    args: Args,
}

impl Linter {
    fn new(args: Args) -> Self {
        Linter {
            handler: Handler::new(args.events),
            parser: SaxParser::with_config(ParserConfig::new().debug(args.debug)),
            args,
        }
    }

    fn read(file: Option<&PathBuf>) -> Result<Vec<u8>> {
        match file {
            Some(path) => {
                fs::read(path).with_context(|| format!("cannot read '{}'", path.display()))
            }
            None => {
                let mut buffer = Vec::new();
                stdin()
                    .read_to_end(&mut buffer)
                    .context("cannot read standard input")?;
                Ok(buffer)
            }
        }
    }

    /// Returns true if the document had no errors.
    fn lint_file(&mut self, file: Option<&PathBuf>) -> Result<bool> {
        let name = file.map_or("stdin".to_string(), |path| path.display().to_string());
        let text = Linter::read(file)?;
        self.handler.reset();
        self.parser.parse(
            &name,
            &text,
            &mut self.handler,
            &mut Tracer,
            &mut EncodingTranscoder,
        );
        info!(
            "{}: {} lines, {} errors",
            self.parser.file_name(),
            self.parser.line_nr(),
            self.handler.nr_errors
        );
        self.handler.report(self.args.stat, self.args.count);
        Ok(self.handler.nr_errors == 0)
    }

    fn run(&mut self) -> Result<bool> {
        let files = self.args.files.clone();
        if files.is_empty() {
            return self.lint_file(None);
        }
        let mut all_good = true;
        for file in files.iter() {
            all_good &= self.lint_file(Some(file))?;
        }
        Ok(all_good)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.debug { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut linter = Linter::new(args);
    match linter.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("saxlint: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
