//! MCP stdio server
//!
//! Reads line-delimited JSON-RPC from an async reader and writes responses
//! to an async writer. Requests other than `tools/call` are answered inline.
//! Every `tools/call` runs in its own task, so calls may complete out of
//! order; all responses funnel through a single writer task.
//!
//! `notifications/cancelled` aborts every in-flight call that was sent with
//! the given request id (clients should not reuse ids, but nothing breaks if
//! they do). A cancelled call gets no response.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use miniflux_mcp_application::DispatchToolUseCase;
use miniflux_mcp_domain::ToolCall;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::protocol::{
    CallToolResult, CancelledParams, JsonRpcRequest, JsonRpcResponse, McpTool, RpcError,
    ServerInfo, ToolCallParams, initialize_result,
};

/// Capacity of the response channel feeding the writer task
const RESPONSE_BUFFER: usize = 64;

/// Errors that end the serve loop
#[derive(Error, Debug)]
pub enum McpServerError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response writer task failed: {0}")]
    Writer(#[from] tokio::task::JoinError),
}

/// What the read loop should do with one incoming line
#[derive(Debug)]
pub enum Routed {
    /// Answer immediately
    Respond(JsonRpcResponse),
    /// Run a tool call in the background and answer when it finishes
    Call { id: Value, params: ToolCallParams },
    /// Abort the in-flight call with this request id
    Cancel(Value),
    /// Nothing to send
    Ignore,
}

/// Running calls by request id; each entry is tagged with its call number
type InFlight = Arc<Mutex<HashMap<String, Vec<(u64, AbortHandle)>>>>;

/// Line-delimited JSON-RPC server exposing the tool registry over MCP
pub struct McpServer {
    dispatcher: DispatchToolUseCase,
    info: ServerInfo,
    in_flight: InFlight,
    next_call: AtomicU64,
}

impl McpServer {
    pub fn new(dispatcher: DispatchToolUseCase, info: ServerInfo) -> Self {
        Self {
            dispatcher,
            info,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_call: AtomicU64::new(0),
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), McpServerError> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve until `reader` reaches end of input.
    ///
    /// In-flight calls are allowed to finish before this returns.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), McpServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(
            "MCP server {} {} ready ({} tools)",
            self.info.name,
            self.info.version,
            self.dispatcher.registry().len()
        );

        let (tx, rx) = mpsc::channel::<String>(RESPONSE_BUFFER);
        let writer_task = tokio::spawn(write_responses(writer, rx));
        let tracker = TaskTracker::new();

        let mut lines = reader.lines();
        let read_result = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            };

            match self.route(&line) {
                Routed::Respond(response) => {
                    let encoded = serde_json::to_string(&response)?;
                    if tx.send(encoded).await.is_err() {
                        warn!("Response writer closed; stopping");
                        break Ok(());
                    }
                }
                Routed::Call { id, params } => self.spawn_call(&tracker, &tx, id, params),
                Routed::Cancel(request_id) => self.cancel(&request_id),
                Routed::Ignore => {}
            }
        };

        tracker.close();
        if !tracker.is_empty() {
            info!("Input closed; waiting for {} running calls", self.in_flight_calls());
        }
        tracker.wait().await;
        drop(tx);

        let write_result = writer_task.await?;
        info!("MCP session ended");
        read_result?;
        write_result?;
        Ok(())
    }

    /// Decide what to do with one raw line.
    pub fn route(&self, line: &str) -> Routed {
        let line = line.trim();
        if line.is_empty() {
            return Routed::Ignore;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparsable JSON-RPC line: {}", e);
                return Routed::Respond(JsonRpcResponse::error(Value::Null, RpcError::parse_error(e)));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid JSON-RPC request: {}", e);
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                return Routed::Respond(JsonRpcResponse::error(id, RpcError::invalid_request(e)));
            }
        };

        debug!("MCP {} (id: {:?})", request.method, request.id);

        if request.is_notification() {
            return self.route_notification(request);
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => {
                Routed::Respond(JsonRpcResponse::success(id, initialize_result(&self.info)))
            }
            "ping" => Routed::Respond(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Routed::Respond(JsonRpcResponse::success(id, self.tools_list())),
            "tools/call" => {
                let Some(params) = request.params else {
                    return Routed::Respond(JsonRpcResponse::error(
                        id,
                        RpcError::invalid_params("missing params for tools/call"),
                    ));
                };
                match serde_json::from_value::<ToolCallParams>(params) {
                    Ok(params) => Routed::Call { id, params },
                    Err(e) => Routed::Respond(JsonRpcResponse::error(id, RpcError::invalid_params(e))),
                }
            }
            other => Routed::Respond(JsonRpcResponse::error(id, RpcError::method_not_found(other))),
        }
    }

    fn route_notification(&self, request: JsonRpcRequest) -> Routed {
        match request.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialized");
                Routed::Ignore
            }
            "notifications/cancelled" => {
                match request
                    .params
                    .map(serde_json::from_value::<CancelledParams>)
                    .transpose()
                {
                    Ok(Some(params)) => {
                        if let Some(reason) = &params.reason {
                            debug!("Cancellation reason: {}", reason);
                        }
                        Routed::Cancel(params.request_id)
                    }
                    Ok(None) => Routed::Ignore,
                    Err(e) => {
                        warn!("Malformed cancellation: {}", e);
                        Routed::Ignore
                    }
                }
            }
            other => {
                debug!("Ignoring notification: {}", other);
                Routed::Ignore
            }
        }
    }

    /// Result of `tools/list`, in registry order
    pub fn tools_list(&self) -> Value {
        let tools: Vec<McpTool> = self.dispatcher.registry().list().map(McpTool::from).collect();
        json!({ "tools": tools })
    }

    fn spawn_call(&self, tracker: &TaskTracker, tx: &mpsc::Sender<String>, id: Value, params: ToolCallParams) {
        let key = id.to_string();
        let call_number = self.next_call.fetch_add(1, Ordering::Relaxed);
        let dispatcher = self.dispatcher.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let tx = tx.clone();
        let task_key = key.clone();

        // Hold the lock across spawn so the task cannot finish and deregister
        // before its handle is recorded.
        let mut guard = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let handle = tracker.spawn(async move {
            let result = call_tool(&dispatcher, params).await;
            deregister(&in_flight, &task_key, call_number);

            let response = serde_json::to_value(&result)
                .map(|value| JsonRpcResponse::success(id.clone(), value))
                .unwrap_or_else(|e| JsonRpcResponse::error(id, RpcError::internal_error(e)));
            match serde_json::to_string(&response) {
                Ok(encoded) => {
                    if tx.send(encoded).await.is_err() {
                        warn!("Response writer closed before call finished");
                    }
                }
                Err(e) => warn!("Failed to encode tool response: {}", e),
            }
        });
        guard
            .entry(key)
            .or_default()
            .push((call_number, handle.abort_handle()));
    }

    fn cancel(&self, request_id: &Value) {
        let key = request_id.to_string();
        let handles = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        match handles {
            Some(handles) => {
                info!("Cancelling tool call {} ({} running)", key, handles.len());
                for (_, handle) in handles {
                    handle.abort();
                }
            }
            None => debug!("Cancellation for unknown or finished call {}", key),
        }
    }

    /// Number of tool calls currently running
    pub fn in_flight_calls(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }
}

/// Drop the entry of one finished call, leaving other calls with the same id
fn deregister(in_flight: &InFlight, key: &str, call_number: u64) {
    let mut map = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(calls) = map.get_mut(key) {
        calls.retain(|(number, _)| *number != call_number);
        if calls.is_empty() {
            map.remove(key);
        }
    }
}

async fn call_tool(dispatcher: &DispatchToolUseCase, params: ToolCallParams) -> CallToolResult {
    let call = ToolCall::new(params.name).with_arguments(params.arguments);
    dispatcher.execute(&call).await.into()
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::Receiver<String>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
