//! Interactive browser over a loaded database.
//!
//! [`Inspector::eval`] turns one command line into text, so every command
//! is testable without a terminal; [`Inspector::run`] wires it to a
//! [`LineEditor`].

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::{self, Write as _};

use fgdkit_foundation::{EntityCategory, Result};
use fgdkit_schema::{EntityId, EntityRef, Fgd, KeyValue, ValueList};

use crate::editor::{LineEditor, ReadResult};

const COMMANDS: [&str; 7] = ["list", "show", "kv", "io", "bases", "help", "quit"];

const HELP: &str = "\
commands:
  list [category]    list classes, optionally of one category
  show <class>       summary of a class
  kv <class> [key]   keyvalues of a class, or one keyvalue in detail
  io <class>         inputs and outputs of a class
  bases <class>      inheritance tree of a class
  help               this text
  quit               leave the inspector";

/// What the loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep going.
    Text(String),
    /// Leave the loop.
    Quit,
}

/// Command interpreter over one database.
#[derive(Debug)]
pub struct Inspector {
    fgd: Fgd,
    prompt: String,
}

impl Inspector {
    /// Creates an inspector for `fgd`.
    #[must_use]
    pub fn new(fgd: Fgd) -> Self {
        Self {
            fgd,
            prompt: "fgd> ".to_string(),
        }
    }

    /// Returns the database being inspected.
    #[must_use]
    pub const fn fgd(&self) -> &Fgd {
        &self.fgd
    }

    /// Words offered for completion: commands then classnames.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        COMMANDS
            .iter()
            .map(ToString::to_string)
            .chain(self.fgd.iter().map(|ent| ent.classname().to_string()))
            .collect()
    }

    /// Runs the read-eval-print loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails.
    pub fn run<E: LineEditor>(&self, editor: &mut E) -> Result<()> {
        editor.set_keywords(self.keywords());
        println!(
            "{} classes loaded. Type 'help' for commands, Ctrl+D to exit.",
            self.fgd.len()
        );

        loop {
            let line = match editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            editor.add_history(&line);

            match self.eval(&line) {
                Reply::Text(text) => println!("{text}"),
                Reply::Quit => break,
            }
            let _ = io::stdout().flush();
        }
        Ok(())
    }

    /// Evaluates one command line.
    #[must_use]
    pub fn eval(&self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Reply::Text(String::new());
        };
        let args: Vec<&str> = words.collect();

        let text = match command.to_lowercase().as_str() {
            "quit" | "exit" => return Reply::Quit,
            "help" | "?" => HELP.to_string(),
            "list" => self.list(args.first().copied()),
            "show" => self.with_class(&args, show),
            "kv" => self.with_class(&args, |ent| match args.get(1) {
                Some(key) => keyvalue_detail(ent, key),
                None => keyvalues(ent),
            }),
            "io" => self.with_class(&args, connections),
            "bases" => self.with_class(&args, base_tree),
            other => format!("unknown command '{other}' (try 'help')"),
        };
        Reply::Text(text)
    }

    fn with_class(&self, args: &[&str], render: impl FnOnce(EntityRef<'_>) -> String) -> String {
        let Some(classname) = args.first() else {
            return "expected a classname".to_string();
        };
        match self.fgd.get(classname) {
            Some(ent) => render(ent),
            None => format!("no class \"{classname}\""),
        }
    }

    fn list(&self, category: Option<&str>) -> String {
        let filter = match category {
            Some(name) => match parse_category(name) {
                Some(category) => Some(category),
                None => return format!("unknown category \"{name}\""),
            },
            None => None,
        };

        let mut out = String::new();
        let mut count = 0usize;
        for ent in self.fgd.iter() {
            if filter.is_some_and(|category| ent.category() != category) {
                continue;
            }
            count += 1;
            let _ = writeln!(out, "  {:<14} {}", ent.category().keyword(), ent.classname());
        }
        let _ = write!(out, "{count} classes");
        out
    }
}

/// Accepts `pointclass`, `point` or `@PointClass`.
fn parse_category(name: &str) -> Option<EntityCategory> {
    let name = name.trim_start_matches('@');
    EntityCategory::from_keyword(name).or_else(|| EntityCategory::from_keyword(&format!("{name}class")))
}

fn show(ent: EntityRef<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", ent.classname(), ent.category());
    let base_names = ent.base_names();
    if !base_names.is_empty() {
        let _ = writeln!(out, "  bases: {}", base_names.join(", "));
    }
    for helper in ent.helpers() {
        let _ = writeln!(out, "  helper: {}({})", helper.kind, helper.args.join(", "));
    }
    if !ent.description().is_empty() {
        let _ = writeln!(out, "  {}", ent.description());
    }
    let _ = write!(
        out,
        "  {} keyvalues, {} inputs, {} outputs",
        ent.keyvalues().len(),
        ent.inputs().len(),
        ent.outputs().len()
    );
    out
}

fn keyvalues(ent: EntityRef<'_>) -> String {
    let mut out = String::new();
    for (_, kv) in ent.keyvalues().iter() {
        let _ = write!(out, "  {}({})", kv.name, kv.value_type);
        if kv.readonly {
            out.push_str(" readonly");
        }
        let _ = write!(out, " : \"{}\"", kv.display_name);
        if !kv.default.is_empty() {
            let _ = write!(out, " : {}", kv.default);
        }
        out.push('\n');
    }
    let _ = write!(out, "{} keyvalues", ent.keyvalues().len());
    out
}

fn keyvalue_detail(ent: EntityRef<'_>, key: &str) -> String {
    let Some(kv) = ent.keyvalues().get(key) else {
        return format!("{} has no keyvalue \"{key}\"", ent.classname());
    };
    describe_keyvalue(kv)
}

fn describe_keyvalue(kv: &KeyValue) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", kv.name, kv.value_type);
    let _ = writeln!(out, "  display: {}", kv.display_name);
    if !kv.default.is_empty() {
        let _ = writeln!(out, "  default: {}", kv.default);
    }
    if kv.readonly {
        let _ = writeln!(out, "  readonly");
    }
    if !kv.description.is_empty() {
        let _ = writeln!(out, "  {}", kv.description);
    }
    match &kv.values {
        Some(ValueList::Flags(flags)) => {
            for flag in flags {
                let state = if flag.default { "on" } else { "off" };
                let _ = writeln!(out, "  [{}] {} ({state})", flag.bit.value(), flag.label);
            }
        }
        Some(ValueList::Choices(choices)) => {
            for choice in choices {
                let _ = writeln!(out, "  {} = {}", choice.value, choice.label);
            }
        }
        None => {}
    }
    out.trim_end().to_string()
}

fn connections(ent: EntityRef<'_>) -> String {
    let mut out = String::new();
    for (_, input) in ent.inputs().iter() {
        let _ = writeln!(out, "  input  {}({})", input.name, input.value_type);
    }
    for (_, output) in ent.outputs().iter() {
        let _ = writeln!(out, "  output {}({})", output.name, output.value_type);
    }
    let _ = write!(
        out,
        "{} inputs, {} outputs",
        ent.inputs().len(),
        ent.outputs().len()
    );
    out
}

fn base_tree(ent: EntityRef<'_>) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    write_bases(ent, 0, &mut seen, &mut out);
    out.trim_end().to_string()
}

fn write_bases(ent: EntityRef<'_>, depth: usize, seen: &mut HashSet<EntityId>, out: &mut String) {
    let indent = "  ".repeat(depth);
    if !seen.insert(ent.id()) {
        let _ = writeln!(out, "{indent}{} (cycle)", ent.classname());
        return;
    }
    let _ = writeln!(out, "{indent}{}", ent.classname());
    for base in ent.bases() {
        write_bases(base, depth + 1, seen, out);
    }
}
