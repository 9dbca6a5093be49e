use clap::ValueEnum;
use movie_catalog_core::StoreError;
use owo_colors::OwoColorize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    fn glyph(self) -> Option<String> {
        match self {
            Level::Success => Some("✓".green().to_string()),
            Level::Info => None,
            Level::Warning => Some("⚠".yellow().to_string()),
            Level::Error => Some("✗".red().to_string()),
        }
    }
}

/// One line of command feedback. In JSON mode its fields sit next to `type` and `message`,
/// so scripts can read the affected movie without parsing the sentence.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    fields: Map<String, Value>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Map::new(),
        }
    }

    /// The movie a command acted on
    pub fn movie(self, id: &str, title: &str) -> Self {
        self.with("movieId", id).with("title", title)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    fn envelope(&self, level: Level) -> Value {
        let mut body = Map::new();
        body.insert("type".to_string(), level.tag().into());
        body.insert("message".to_string(), self.message.clone().into());
        for (key, value) in &self.fields {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }
}

impl From<String> for Notice {
    fn from(message: String) -> Self {
        Notice::new(message)
    }
}

impl From<&str> for Notice {
    fn from(message: &str) -> Self {
        Notice::new(message)
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Notice::new(err.to_string()).with("code", "not_found").with("movieId", id.as_str()),
            StoreError::Invalid(_) => Notice::new(err.to_string()).with("code", "invalid"),
        }
    }
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Results are emitted as JSON documents instead of tables
    pub fn is_json(&self) -> bool {
        self.format != OutputFormat::Human
    }

    pub fn success(&self, notice: impl Into<Notice>) {
        self.emit(Level::Success, notice.into());
    }

    pub fn info(&self, notice: impl Into<Notice>) {
        self.emit(Level::Info, notice.into());
    }

    pub fn warn(&self, notice: impl Into<Notice>) {
        self.emit(Level::Warning, notice.into());
    }

    /// Shown even in quiet mode
    pub fn error(&self, notice: impl Into<Notice>) {
        self.emit(Level::Error, notice.into());
    }

    pub fn json(&self, data: &Value) {
        if self.quiet {
            return;
        }
        self.print_json(data);
    }

    fn emit(&self, level: Level, notice: Notice) {
        if self.quiet && level != Level::Error {
            return;
        }

        if self.is_json() {
            self.print_json(&notice.envelope(level));
            return;
        }

        let line = match level.glyph() {
            Some(glyph) => format!("{} {}", glyph, notice.message),
            None => notice.message,
        };
        if level == Level::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn print_json(&self, data: &Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            OutputFormat::Json | OutputFormat::Human => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
