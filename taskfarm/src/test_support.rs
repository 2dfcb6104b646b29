//! Test-only helpers: catalog builders and scripted gateways.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use anyhow::{Context, Result};

use crate::catalog::{Catalog, Grouping, TaskNode, TaskStatus};
use crate::core::types::ActionReply;
use crate::io::account::{AccountGateway, Balance, FarmingSession};
use crate::io::error::GatewayError;
use crate::io::gateway::{TaskGateway, decode_catalog};

/// Create a task with a deterministic title and no sub-tasks.
pub fn task(id: &str, status: &str) -> TaskNode {
    TaskNode {
        id: id.to_string(),
        title: format!("{id} title"),
        status: TaskStatus::from(status),
        disclaimer_required: false,
        sub_tasks: Vec::new(),
    }
}

/// Create a task carrying its own sub-task list.
pub fn task_with_subtasks(id: &str, status: &str, sub_tasks: Vec<TaskNode>) -> TaskNode {
    TaskNode {
        sub_tasks,
        ..task(id, status)
    }
}

/// Create a grouping with direct tasks only.
pub fn grouping(title: &str, tasks: Vec<TaskNode>) -> Grouping {
    grouping_with_sections(title, tasks, Vec::new())
}

/// Create a grouping with direct tasks and nested sub-sections.
pub fn grouping_with_sections(
    title: &str,
    tasks: Vec<TaskNode>,
    sub_sections: Vec<Grouping>,
) -> Grouping {
    Grouping {
        title: title.to_string(),
        tasks,
        sub_sections,
    }
}

/// Load a catalog fixture from `tests/fixtures/<name>.json`.
pub fn load_catalog_fixture(name: &str) -> Result<Catalog> {
    let path = format!("{}/tests/fixtures/{name}.json", env!("CARGO_MANIFEST_DIR"));
    let body = std::fs::read_to_string(&path).with_context(|| format!("read fixture {path}"))?;
    decode_catalog(&body).with_context(|| format!("decode fixture {path}"))
}

/// Transport failure used by scripted gateways.
pub fn transport_failure(operation: &str, id: &str) -> GatewayError {
    GatewayError::Status {
        url: format!("scripted://{operation}/{id}"),
        status: 503,
        body: "scripted transport failure".to_string(),
    }
}

/// A remote call observed by [`ScriptedGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchCatalog,
    Start(String),
    Claim(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(ActionReply),
    TransportFailure,
}

/// In-memory gateway replaying scripted replies and recording every call.
///
/// Unscripted starts and claims are accepted and echo the task id as title.
pub struct ScriptedGateway {
    catalog: Catalog,
    fail_fetch: bool,
    starts: HashMap<String, Scripted>,
    claims: HashMap<String, Scripted>,
    calls: RefCell<Vec<GatewayCall>>,
}

impl ScriptedGateway {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            fail_fetch: false,
            starts: HashMap::new(),
            claims: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn reject_start(mut self, id: &str, reason: Option<&str>) -> Self {
        self.starts.insert(id.to_string(), rejection(reason));
        self
    }

    pub fn reject_claim(mut self, id: &str, reason: Option<&str>) -> Self {
        self.claims.insert(id.to_string(), rejection(reason));
        self
    }

    pub fn fail_start(mut self, id: &str) -> Self {
        self.starts.insert(id.to_string(), Scripted::TransportFailure);
        self
    }

    pub fn fail_claim(mut self, id: &str) -> Self {
        self.claims.insert(id.to_string(), Scripted::TransportFailure);
        self
    }

    pub fn fail_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    fn replay(
        script: &HashMap<String, Scripted>,
        operation: &str,
        id: &str,
    ) -> Result<ActionReply, GatewayError> {
        match script.get(id) {
            Some(Scripted::Reply(reply)) => Ok(reply.clone()),
            Some(Scripted::TransportFailure) => Err(transport_failure(operation, id)),
            None => Ok(ActionReply::Accepted {
                title: id.to_string(),
            }),
        }
    }
}

fn rejection(reason: Option<&str>) -> Scripted {
    Scripted::Reply(ActionReply::Rejected {
        reason: reason.map(str::to_string),
    })
}

impl TaskGateway for ScriptedGateway {
    fn fetch_catalog(&self) -> Result<Catalog, GatewayError> {
        self.calls.borrow_mut().push(GatewayCall::FetchCatalog);
        if self.fail_fetch {
            return Err(transport_failure("tasks", "catalog"));
        }
        Ok(self.catalog.clone())
    }

    fn start(&self, task_id: &str) -> Result<ActionReply, GatewayError> {
        self.calls
            .borrow_mut()
            .push(GatewayCall::Start(task_id.to_string()));
        Self::replay(&self.starts, "start", task_id)
    }

    fn claim(&self, task_id: &str) -> Result<ActionReply, GatewayError> {
        self.calls
            .borrow_mut()
            .push(GatewayCall::Claim(task_id.to_string()));
        Self::replay(&self.claims, "claim", task_id)
    }
}

/// In-memory account gateway with fixed replies.
pub struct ScriptedAccount {
    pub username: String,
    pub balance: Balance,
    pub farm_claim_message: String,
    pub daily_message: String,
    pub game_ids: RefCell<VecDeque<String>>,
    pub game_claims: RefCell<Vec<(String, u32)>>,
    pub farming_started: RefCell<bool>,
}

impl ScriptedAccount {
    pub fn new(play_passes: u32) -> Self {
        Self {
            username: "farmer".to_string(),
            balance: Balance {
                available_balance: "100.0".to_string(),
                play_passes,
                farming: Some(FarmingSession {
                    balance: "12.5".to_string(),
                    ..FarmingSession::default()
                }),
                ..Balance::default()
            },
            farm_claim_message: "OK".to_string(),
            daily_message: "OK".to_string(),
            game_ids: RefCell::new((1..=play_passes).map(|n| format!("game-{n}")).collect()),
            game_claims: RefCell::new(Vec::new()),
            farming_started: RefCell::new(false),
        }
    }
}

impl AccountGateway for ScriptedAccount {
    fn username(&self) -> Result<String, GatewayError> {
        Ok(self.username.clone())
    }

    fn balance(&self) -> Result<Balance, GatewayError> {
        Ok(self.balance.clone())
    }

    fn claim_farming(&self) -> Result<String, GatewayError> {
        Ok(self.farm_claim_message.clone())
    }

    fn start_farming(&self) -> Result<FarmingSession, GatewayError> {
        *self.farming_started.borrow_mut() = true;
        Ok(FarmingSession {
            balance: "0".to_string(),
            ..FarmingSession::default()
        })
    }

    fn claim_daily_reward(&self) -> Result<String, GatewayError> {
        Ok(self.daily_message.clone())
    }

    fn start_game(&self) -> Result<String, GatewayError> {
        self.game_ids
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| transport_failure("game", "play"))
    }

    fn claim_game(&self, game_id: &str, points: u32) -> Result<String, GatewayError> {
        self.game_claims
            .borrow_mut()
            .push((game_id.to_string(), points));
        Ok("OK".to_string())
    }
}
