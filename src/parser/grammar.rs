//! Pest grammar parser for the Stockpile command language

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::{Result, StockpileError};
use crate::parser::ast::*;

#[derive(Parser)]
#[grammar = "../grammar/stockpile.pest"]
pub struct StockpileParser;

/// Parse a command string into an AST
pub fn parse_command(input: &str) -> Result<Command> {
    let pairs = StockpileParser::parse(Rule::command, input)
        .map_err(|e| StockpileError::ParseError(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| StockpileError::ParseError("Empty input".to_string()))?;

    // command -> statement
    let statement = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::statement)
        .ok_or_else(|| StockpileError::ParseError("Expected statement".to_string()))?;

    parse_statement(statement)
}

/// Parse a script (multiple statements) into an AST
pub fn parse_script(input: &str) -> Result<Script> {
    let pairs = StockpileParser::parse(Rule::script, input)
        .map_err(|e| StockpileError::ParseError(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| StockpileError::ParseError("Empty script".to_string()))?;

    let mut statements = Vec::new();

    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::statement {
            statements.push(parse_statement(inner)?);
        }
    }

    Ok(Script { statements })
}

fn parse_statement(pair: Pair<Rule>) -> Result<Command> {
    let inner = first_inner(pair, "statement content")?;

    match inner.as_rule() {
        Rule::explain_cmd => {
            let operation = first_inner(inner, "command after EXPLAIN")?;
            Ok(Command::Explain(Box::new(parse_operation(operation)?)))
        }
        Rule::operation => parse_operation(inner),
        _ => Err(StockpileError::ParseError(format!(
            "Unexpected rule in statement: {:?}",
            inner.as_rule()
        ))),
    }
}

fn parse_operation(pair: Pair<Rule>) -> Result<Command> {
    let inner = first_inner(pair, "command")?;

    match inner.as_rule() {
        Rule::list_cmd => Ok(Command::List),
        Rule::show_cmd => Ok(Command::Show(parse_id(first_inner(inner, "id after SHOW")?)?)),
        Rule::delete_cmd => Ok(Command::Delete(parse_id(first_inner(inner, "id after DELETE")?)?)),
        Rule::create_cmd => Ok(Command::Create(parse_create_cmd(inner)?)),
        Rule::edit_cmd => Ok(Command::Edit(parse_edit_cmd(inner)?)),
        Rule::add_cmd => Ok(Command::Add(parse_transfer(inner)?)),
        Rule::take_cmd => Ok(Command::Take(parse_transfer(inner)?)),
        _ => Err(StockpileError::ParseError(format!(
            "Unexpected rule: {:?}",
            inner.as_rule()
        ))),
    }
}

// ============================================================================
// Command Parsing
// ============================================================================

fn parse_create_cmd(pair: Pair<Rule>) -> Result<CreateWarehouse> {
    let mut create = CreateWarehouse::default();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::string => create.name = Some(parse_string(inner)),
            Rule::capacity_clause => {
                create.capacity = Some(parse_number(first_inner(inner, "capacity")?)?)
            }
            Rule::balance_clause => {
                create.initial_balance = Some(parse_number(first_inner(inner, "balance")?)?)
            }
            _ => {}
        }
    }

    Ok(create)
}

fn parse_edit_cmd(pair: Pair<Rule>) -> Result<EditWarehouse> {
    let mut inner = pair.into_inner();

    let id_pair = inner
        .next()
        .ok_or_else(|| StockpileError::ParseError("Expected id after EDIT".to_string()))?;
    let mut edit = EditWarehouse {
        id: parse_id(id_pair)?,
        name: None,
        capacity: None,
    };

    for clause in inner {
        match clause.as_rule() {
            Rule::name_clause => edit.name = Some(parse_string(first_inner(clause, "name")?)),
            Rule::capacity_clause => {
                edit.capacity = Some(parse_number(first_inner(clause, "capacity")?)?)
            }
            _ => {}
        }
    }

    Ok(edit)
}

fn parse_transfer(pair: Pair<Rule>) -> Result<Transfer> {
    let mut amount = None;
    let mut id = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => amount = Some(parse_number(inner)?),
            Rule::id => id = Some(parse_id(inner)?),
            _ => {}
        }
    }

    let id = id.ok_or_else(|| StockpileError::ParseError("Expected warehouse id".to_string()))?;
    Ok(Transfer { id, amount })
}

// ============================================================================
// Literals
// ============================================================================

fn first_inner<'a>(pair: Pair<'a, Rule>, what: &str) -> Result<Pair<'a, Rule>> {
    pair.into_inner()
        .next()
        .ok_or_else(|| StockpileError::ParseError(format!("Expected {}", what)))
}

fn parse_id(pair: Pair<Rule>) -> Result<u64> {
    pair.as_str()
        .parse::<u64>()
        .map_err(|e| StockpileError::ParseError(format!("Invalid id '{}': {}", pair.as_str(), e)))
}

fn parse_number(pair: Pair<Rule>) -> Result<f64> {
    let value = pair
        .as_str()
        .parse::<f64>()
        .map_err(|e| StockpileError::ParseError(format!("Invalid number '{}': {}", pair.as_str(), e)))?;

    // Literals too long for f64 come back as infinity
    if !value.is_finite() {
        return Err(StockpileError::ParseError(format!(
            "Number out of range: {}",
            pair.as_str()
        )));
    }
    Ok(value)
}

fn parse_string(pair: Pair<Rule>) -> String {
    // string -> inner
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}
