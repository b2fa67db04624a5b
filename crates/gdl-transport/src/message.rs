use gdl_core::{JointMove, Term};
use gdl_session::GdlError;
use gdl_sexpr::SExpr;

/// One parsed inbound message. `match_id` is carried as the raw wire atom
/// — the session layer treats it as an opaque key.
#[derive(Debug, Clone)]
pub enum Request {
    Info,
    Start {
        match_id: String,
        role: Term,
        rules: Vec<gdl_core::Clause>,
        start_clock_secs: f64,
        play_clock_secs: f64,
    },
    Play {
        match_id: String,
        moves: Option<JointMove>,
    },
    Stop {
        match_id: String,
        moves: Option<JointMove>,
    },
    Abort {
        match_id: String,
    },
}

pub fn parse_request(input: &str) -> Result<Request, GdlError> {
    let expr = gdl_sexpr::parse_one(input).map_err(|e| GdlError::ParseError(e.to_string()))?;
    let items = expr
        .as_list()
        .ok_or_else(|| GdlError::ParseError("message must be a list".into()))?;
    let (verb, rest) = items
        .split_first()
        .ok_or_else(|| GdlError::ParseError("empty message".into()))?;
    let verb = verb
        .as_atom()
        .ok_or_else(|| GdlError::ParseError("verb must be an atom".into()))?;

    match verb.to_ascii_uppercase().as_str() {
        "INFO" => Ok(Request::Info),
        "START" => {
            let match_id = atom_at(rest, 0)?;
            let role = gdl_sexpr::to_term(at(rest, 1)?).map_err(wrap)?;
            let rule_list = at(rest, 2)?
                .as_list()
                .ok_or_else(|| GdlError::ParseError("rules must be a list".into()))?;
            let rules = gdl_sexpr::to_clauses(rule_list).map_err(wrap)?;
            let start_clock_secs = number_at(rest, 3)?;
            let play_clock_secs = number_at(rest, 4)?;
            Ok(Request::Start {
                match_id,
                role,
                rules,
                start_clock_secs,
                play_clock_secs,
            })
        }
        "PLAY" => Ok(Request::Play {
            match_id: atom_at(rest, 0)?,
            moves: joint_move_at(rest, 1)?,
        }),
        "STOP" => Ok(Request::Stop {
            match_id: atom_at(rest, 0)?,
            moves: joint_move_at(rest, 1)?,
        }),
        "ABORT" => Ok(Request::Abort {
            match_id: atom_at(rest, 0)?,
        }),
        other => Err(GdlError::UnknownVerb(other.to_string())),
    }
}

fn wrap(e: gdl_sexpr::SexprError) -> GdlError {
    GdlError::ParseError(e.to_string())
}

fn at<'a>(items: &'a [SExpr], i: usize) -> Result<&'a SExpr, GdlError> {
    items
        .get(i)
        .ok_or_else(|| GdlError::ParseError(format!("missing argument {}", i)))
}

fn atom_at(items: &[SExpr], i: usize) -> Result<String, GdlError> {
    at(items, i)?
        .as_atom()
        .map(str::to_string)
        .ok_or_else(|| GdlError::ParseError(format!("argument {} must be an atom", i)))
}

fn number_at(items: &[SExpr], i: usize) -> Result<f64, GdlError> {
    atom_at(items, i)?
        .parse::<f64>()
        .map_err(|_| GdlError::ParseError(format!("argument {} must be a number", i)))
}

fn joint_move_at(items: &[SExpr], i: usize) -> Result<Option<JointMove>, GdlError> {
    let expr = at(items, i)?;
    if expr.as_atom().is_some_and(|a| a.eq_ignore_ascii_case("nil")) {
        return Ok(None);
    }
    let list = expr
        .as_list()
        .ok_or_else(|| GdlError::ParseError("joint move must be a list or NIL".into()))?;
    let moves = list
        .iter()
        .map(gdl_sexpr::to_term)
        .collect::<Result<Vec<_>, _>>()
        .map_err(wrap)?;
    Ok(Some(moves))
}

/// Encodes the fixed `((name <PLAYER>)(status available))` INFO reply.
pub fn encode_info(name: &str) -> String {
    format!("((name {})(status available))", name)
}

pub fn encode_ready() -> String {
    "ready".to_string()
}

pub fn encode_done() -> String {
    "done".to_string()
}

pub fn encode_action(action: &Term) -> String {
    gdl_sexpr::print(&gdl_sexpr::from_term(action))
}
