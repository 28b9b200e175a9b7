/// Sample source: a measurement session with readings and notes
///
/// Shows how a domain type is wrapped as a `Node` without touching the
/// domain type, and how the query kinds combine into a report:
/// header rows, a nested readings table with a counter and running
/// difference, and a branch over the session's notes.
use crate::error::QueryError;
use crate::query::*;
use chrono::NaiveDate;
use std::rc::Rc;

/// One measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub label: String,
    pub value: f64,
    pub passed: bool,
}

/// A test session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub date: NaiveDate,
    pub tester: String,
    pub readings: Vec<Reading>,
    pub notes: Vec<String>,
}

impl Session {
    pub fn verdict(&self) -> &'static str {
        if self.readings.iter().all(|r| r.passed) { "PASS" } else { "FAIL" }
    }
}

/// Source adapter over sessions and their readings.
///
/// A session's children are its readings; readings have no children.
#[derive(Debug, Clone)]
pub enum SessionNode {
    Session(Rc<Session>),
    Reading(Reading),
}

impl SessionNode {
    pub fn new(session: Session) -> Self {
        SessionNode::Session(Rc::new(session))
    }

    fn session(&self) -> Result<&Session, QueryError> {
        match self {
            SessionNode::Session(session) => Ok(session.as_ref()),
            SessionNode::Reading(r) => Err(QueryError::new(format!("reading {:?} is not a session", r.label))),
        }
    }

    fn reading(&self) -> Result<&Reading, QueryError> {
        match self {
            SessionNode::Reading(reading) => Ok(reading),
            SessionNode::Session(_) => Err(QueryError::new("a session is not a reading")),
        }
    }

    /// Branch target: the session's free-text notes
    pub fn notes(&self) -> Vec<String> {
        match self {
            SessionNode::Session(session) => session.notes.clone(),
            SessionNode::Reading(_) => Vec::new(),
        }
    }
}

impl Node for SessionNode {
    fn children(&self) -> Vec<Self> {
        match self {
            SessionNode::Session(session) => session.readings.iter().cloned().map(SessionNode::Reading).collect(),
            SessionNode::Reading(_) => Vec::new(),
        }
    }
}

/// Built-in session used by `boxtab demo`
pub fn sample_session(date: NaiveDate) -> Session {
    let reading = |label: &str, value: f64, passed: bool| Reading { label: label.to_string(), value, passed };
    Session {
        date,
        tester: "Alice".to_string(),
        readings: vec![
            reading("inlet", 12.5, true),
            reading("outlet", 13.0, true),
            reading("bypass", 11.75, true),
        ],
        notes: vec!["calibrated before run".to_string(), "ambient 21C".to_string()],
    }
}

/// Queries for a session report; reading numbers start at `origin`
pub fn session_queries(origin: i64) -> RowQueries<SessionNode> {
    let header = |name: &'static str, getter: Getter<SessionNode>| {
        row(OneTimeRowQuery::new(vec![col(Value::new(name)), col(getter.with_label(name))]).with_label(name))
    };

    let readings = Nested::new(vec![
        row(OneTimeRowQuery::new(vec![
            col(Value::new("#")),
            col(Value::new("Reading")),
            col(Value::new("Value")),
            col(Value::new("Delta")),
        ])
        .with_label("readings header")),
        row(EveryRowQuery::new(vec![
            col(Counter::new(origin).with_label("reading number")),
            col(Getter::try_new(|n: &SessionNode| n.reading().map(|r| r.label.clone())).with_label("reading label")),
            col(Getter::try_new(|n: &SessionNode| n.reading().map(|r| format!("{:.2}", r.value))).with_label("reading value")),
            col(RunningDifference::try_new(|n: &SessionNode| n.reading().map(|r| r.value))
                .with_precision(2)
                .with_label("reading delta")),
        ])
        .with_label("readings")),
    ])
    .with_label("readings table");

    vec![
        header("Date", Getter::try_new(|n: &SessionNode| n.session().map(|s| s.date.format("%Y-%m-%d").to_string()))),
        header("Tested by", Getter::try_new(|n: &SessionNode| n.session().map(|s| s.tester.clone()))),
        header("Final result", Getter::try_new(|n: &SessionNode| n.session().map(Session::verdict))),
        row(OneTimeRowQuery::new(vec![col(Value::new("Readings")), col(readings)]).with_label("readings row")),
        row(EveryRowQuery::branch(SessionNode::notes, vec![
            col(Value::new("Note")),
            col(Getter::new(|note: &String| note.clone())),
        ])
        .with_label("notes")),
    ]
}
