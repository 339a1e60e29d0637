//! Parseo manual de argumentos: `chem [--memory] <comando> [opciones]`.

use chem_domain::{ChemicalId, ChemicalUpdate, DomainError};

pub const USAGE: &str = "\
Uso: chem [--memory] <comando>
  list [--limit N] [--offset N]
  get <id>
  show <id>
  create --name <TXT> --cas <TXT> --quantity <N> --unit <TXT>
  update <id> [--name <TXT>] [--cas <TXT>] [--quantity <N>] [--unit <TXT>]
  delete <id>
  logs <id> [--limit N] [--offset N]
  log <id> --action <add|remove|update> --quantity <N>
  seed
  health";

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { limit: i64, offset: i64 },
    Get { id: ChemicalId },
    Show { id: ChemicalId },
    Create { name: String, cas_number: String, quantity: i32, unit: String },
    Update { id: ChemicalId, changes: ChemicalUpdate },
    Delete { id: ChemicalId },
    Logs { id: ChemicalId, limit: i64, offset: i64 },
    Log { id: ChemicalId, action: String, quantity: i32 },
    Seed,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub memory: bool,
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgError {
    /// Forma de invocación incorrecta (exit 2).
    Usage(String),
    /// Valor rechazado por el dominio al construir el comando (exit 3).
    Invalid(DomainError),
}

impl From<DomainError> for ArgError {
    fn from(e: DomainError) -> Self {
        ArgError::Invalid(e)
    }
}

fn usage(msg: impl Into<String>) -> ArgError {
    ArgError::Usage(msg.into())
}

/// Opciones `--clave valor` que siguen a los posicionales.
struct Flags<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Flags<'a> {
    fn parse(rest: &'a [String], allowed: &[&str]) -> Result<Self, ArgError> {
        let mut pairs = Vec::new();
        let mut i = 0;
        while i < rest.len() {
            let key = rest[i].as_str();
            if !allowed.contains(&key) {
                return Err(usage(format!("opción desconocida: {key}")));
            }
            let value = rest.get(i + 1).ok_or_else(|| usage(format!("falta valor para {key}")))?;
            pairs.push((key, value.as_str()));
            i += 2;
        }
        Ok(Flags { pairs })
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn require(&self, key: &str) -> Result<&'a str, ArgError> {
        self.get(key).ok_or_else(|| usage(format!("falta {key}")))
    }

    fn number<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ArgError> {
        self.get(key)
            .map(|raw| raw.parse::<T>().map_err(|_| usage(format!("{key} debe ser numérico: '{raw}'"))))
            .transpose()
    }
}

fn parse_id(raw: Option<&String>) -> Result<ChemicalId, ArgError> {
    let raw = raw.ok_or_else(|| usage("falta <id>"))?;
    raw.parse().map_err(|_| usage(format!("id inválido: '{raw}'")))
}

/// `args` excluye el nombre del programa.
pub fn parse_command(args: &[String]) -> Result<Invocation, ArgError> {
    let (memory, args) = match args.first().map(String::as_str) {
        Some("--memory") => (true, &args[1..]),
        _ => (false, args),
    };
    let Some((name, rest)) = args.split_first() else { return Err(usage("falta <comando>")) };

    let command = match name.as_str() {
        "list" => {
            let flags = Flags::parse(rest, &["--limit", "--offset"])?;
            Command::List { limit: flags.number("--limit")?.unwrap_or(DEFAULT_LIMIT),
                            offset: flags.number("--offset")?.unwrap_or(0) }
        }
        "get" | "show" | "delete" => {
            let id = parse_id(rest.first())?;
            Flags::parse(&rest[1..], &[])?;
            match name.as_str() {
                "get" => Command::Get { id },
                "show" => Command::Show { id },
                _ => Command::Delete { id },
            }
        }
        "create" => {
            let flags = Flags::parse(rest, &["--name", "--cas", "--quantity", "--unit"])?;
            Command::Create { name: flags.require("--name")?.to_string(),
                              cas_number: flags.require("--cas")?.to_string(),
                              quantity: flags.number("--quantity")?.ok_or_else(|| usage("falta --quantity"))?,
                              unit: flags.require("--unit")?.to_string() }
        }
        "update" => {
            let id = parse_id(rest.first())?;
            let flags = Flags::parse(&rest[1..], &["--name", "--cas", "--quantity", "--unit"])?;
            let mut changes = ChemicalUpdate::new();
            if let Some(v) = flags.get("--name") {
                changes = changes.name(v)?;
            }
            if let Some(v) = flags.get("--cas") {
                changes = changes.cas_number(v)?;
            }
            if let Some(q) = flags.number("--quantity")? {
                changes = changes.quantity(q)?;
            }
            if let Some(v) = flags.get("--unit") {
                changes = changes.unit(v)?;
            }
            Command::Update { id, changes }
        }
        "logs" => {
            let id = parse_id(rest.first())?;
            let flags = Flags::parse(&rest[1..], &["--limit", "--offset"])?;
            Command::Logs { id,
                            limit: flags.number("--limit")?.unwrap_or(DEFAULT_LIMIT),
                            offset: flags.number("--offset")?.unwrap_or(0) }
        }
        "log" => {
            let id = parse_id(rest.first())?;
            let flags = Flags::parse(&rest[1..], &["--action", "--quantity"])?;
            Command::Log { id,
                           action: flags.require("--action")?.to_string(),
                           quantity: flags.number("--quantity")?.ok_or_else(|| usage("falta --quantity"))? }
        }
        "seed" | "health" if rest.is_empty() => {
            if name == "seed" {
                Command::Seed
            } else {
                Command::Health
            }
        }
        other => return Err(usage(format!("comando desconocido o con argumentos de más: {other}"))),
    };
    Ok(Invocation { memory, command })
}
