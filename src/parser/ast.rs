//! Abstract Syntax Tree definitions for the Stockpile command language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// LIST
    List,
    /// SHOW <id>
    Show(u64),
    /// CREATE ["name"] [CAPACITY n] [BALANCE n]
    Create(CreateWarehouse),
    /// EDIT <id> [NAME "name"] [CAPACITY n]
    Edit(EditWarehouse),
    /// ADD [n] TO <id>
    Add(Transfer),
    /// TAKE [n] FROM <id>
    Take(Transfer),
    /// DELETE <id>
    Delete(u64),
    /// EXPLAIN <command>
    Explain(Box<Command>),
}

/// A script is a sequence of commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub statements: Vec<Command>,
}

/// Fields of a CREATE command. Anything left out falls back to the
/// configured defaults at execution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateWarehouse {
    pub name: Option<String>,
    pub capacity: Option<f64>,
    pub initial_balance: Option<f64>,
}

/// Fields of an EDIT command. Anything left out keeps its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditWarehouse {
    pub id: u64,
    pub name: Option<String>,
    pub capacity: Option<f64>,
}

/// Amount moved into or out of a warehouse by ADD / TAKE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: u64,
    pub amount: Option<f64>,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::List => write!(f, "LIST"),
            Command::Show(id) => write!(f, "SHOW {}", id),
            Command::Create(create) => {
                write!(f, "CREATE")?;
                if let Some(ref name) = create.name {
                    write!(f, " \"{}\"", name)?;
                }
                if let Some(capacity) = create.capacity {
                    write!(f, " CAPACITY {}", capacity)?;
                }
                if let Some(balance) = create.initial_balance {
                    write!(f, " BALANCE {}", balance)?;
                }
                Ok(())
            }
            Command::Edit(edit) => {
                write!(f, "EDIT {}", edit.id)?;
                if let Some(ref name) = edit.name {
                    write!(f, " NAME \"{}\"", name)?;
                }
                if let Some(capacity) = edit.capacity {
                    write!(f, " CAPACITY {}", capacity)?;
                }
                Ok(())
            }
            Command::Add(transfer) => match transfer.amount {
                Some(amount) => write!(f, "ADD {} TO {}", amount, transfer.id),
                None => write!(f, "ADD TO {}", transfer.id),
            },
            Command::Take(transfer) => match transfer.amount {
                Some(amount) => write!(f, "TAKE {} FROM {}", amount, transfer.id),
                None => write!(f, "TAKE FROM {}", transfer.id),
            },
            Command::Delete(id) => write!(f, "DELETE {}", id),
            Command::Explain(inner) => write!(f, "EXPLAIN {}", inner),
        }
    }
}
