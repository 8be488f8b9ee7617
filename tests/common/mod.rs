//! Shared utilities for integration tests: a scripted JSON-RPC node.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Hash returned for every submitted transaction.
pub const TX_HASH: &str = "0xabababababababababababababababababababababababababababababababab";

/// Chain id reported by the mock (Anvil's default).
pub const CHAIN_ID: u64 = 31337;

/// Knobs for the mock node's answers.
#[derive(Debug, Clone)]
pub struct MockOptions {
    pub accounts: Vec<String>,
    pub gas_price_wei: u128,
    pub receipt_success: bool,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            accounts: vec![
                "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string(),
                "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".to_string(),
            ],
            gas_price_wei: 1_000_000_000,
            receipt_success: true,
        }
    }
}

struct MockState {
    options: MockOptions,
    calls: Mutex<Vec<String>>,
}

/// Handle to a running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// JSON-RPC methods received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls().iter().any(|m| m == method)
    }
}

/// Start a mock node on an ephemeral loopback port.
pub async fn start_mock_node(options: MockOptions) -> MockNode {
    let state = Arc::new(MockState {
        options,
        calls: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, state }
}

async fn handle_rpc(State(state): State<Arc<MockState>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req.get("id").cloned().unwrap_or(Value::Null);
    let method = req
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    state.calls.lock().unwrap().push(method.clone());

    let options = &state.options;
    let result = match method.as_str() {
        "eth_chainId" => json!(format!("0x{:x}", CHAIN_ID)),
        "eth_blockNumber" => json!("0x1"),
        "eth_accounts" => json!(options.accounts),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_getBalance" => json!("0xde0b6b3a7640000"),
        "eth_gasPrice" => json!(format!("0x{:x}", options.gas_price_wei)),
        "eth_sendRawTransaction" | "eth_sendTransaction" => json!(TX_HASH),
        "eth_getTransactionReceipt" => receipt(options.receipt_success),
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {} not found", method) }
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn receipt(success: bool) -> Value {
    json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        "contractAddress": null
    })
}
