use anyhow::Result;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        Implementation, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam,
        ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::metadata::{
    CHECK_CATEGORY, CategoryArgs, GET_SUBCATEGORIES, IS_VALID_CATEGORY, SubcategoriesArgs,
    all_tool_metadata,
};
use crate::registry::CategoryRegistry;

/// MCP server answering category lookups over stdio.
///
/// The registry is loaded before the server is built and shared read-only,
/// so concurrent tool calls need no coordination.
#[derive(Clone)]
pub struct CategoryServer {
    registry: Arc<CategoryRegistry>,

    /// Enabled tool names (filtered by --tool/--tools/--toolset CLI args)
    enabled_tools: Option<HashSet<String>>,
}

impl CategoryServer {
    /// Create a new stdio server
    ///
    /// # Arguments
    /// * `registry` - Loaded category set
    /// * `enabled_tools` - Individual tool names to expose; `None` exposes all
    pub fn new(registry: Arc<CategoryRegistry>, enabled_tools: Option<HashSet<String>>) -> Self {
        log::info!(
            "Category server initialized with {} categories",
            registry.len()
        );
        Self {
            registry,
            enabled_tools,
        }
    }

    fn is_enabled(&self, tool_name: &str) -> bool {
        self.enabled_tools
            .as_ref()
            .is_none_or(|enabled| enabled.contains(tool_name))
    }

    /// Serve over stdio until the client disconnects or `shutdown_token` fires.
    pub async fn serve_stdio(self, shutdown_token: CancellationToken) -> Result<()> {
        log::info!("Starting stdio server");

        // Use rmcp's stdio transport
        let service = self.serve(stdio()).await.inspect_err(|e| {
            log::error!("serving error: {e:?}");
        })?;

        let service_token = service.cancellation_token();
        tokio::spawn(async move {
            shutdown_token.cancelled().await;
            log::debug!("Shutdown requested, closing stdio service");
            service_token.cancel();
        });

        let reason = service.waiting().await?;

        log::info!("Stdio server stopped: {reason:?}");
        Ok(())
    }

    /// Route a tool call to the registry and wrap the return value.
    fn dispatch(&self, tool_name: &str, args: Value) -> Result<CallToolResult, McpError> {
        match tool_name {
            CHECK_CATEGORY => {
                let args: CategoryArgs = parse_args(tool_name, args)?;
                tool_result(&self.registry.check(&args.category))
            }
            IS_VALID_CATEGORY => {
                let args: CategoryArgs = parse_args(tool_name, args)?;
                tool_result(&self.registry.is_valid(&args.category))
            }
            GET_SUBCATEGORIES => {
                let args: SubcategoriesArgs = parse_args(tool_name, args)?;
                tool_result(&self.registry.subcategories(&args.category))
            }
            _ => Err(McpError::invalid_params(
                format!("Unknown tool: {tool_name}"),
                None,
            )),
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, args: Value) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| {
        McpError::invalid_params(format!("Invalid arguments for '{tool_name}': {e}"), None)
    })
}

/// Build a tool result carrying `value` as JSON text and as structured content.
///
/// The text is serialized from the typed value so struct field order is kept.
/// Structured content must be an object, so non-object values are wrapped
/// as `{"result": value}`.
fn tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let serialize_error =
        |e: serde_json::Error| McpError::internal_error(format!("Failed to serialize result: {e}"), None);
    let text = serde_json::to_string(value).map_err(serialize_error)?;
    let value = serde_json::to_value(value).map_err(serialize_error)?;
    let structured = if value.is_object() {
        value
    } else {
        json!({ "result": value })
    };

    let mut result = CallToolResult::success(vec![Content::text(text)]);
    result.structured_content = Some(structured);
    Ok(result)
}

impl ServerHandler for CategoryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Category Checker - look up categories in a fixed list of valid categories"
                    .to_string(),
            ),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_name = request.name.clone();

        // Check if tool is enabled
        if !self.is_enabled(&tool_name) {
            return Err(McpError::invalid_params(
                format!("Tool '{}' is not enabled", tool_name),
                None,
            ));
        }

        log::debug!("Calling tool '{}'", tool_name);

        // Convert arguments to JSON value
        let args = match request.arguments {
            Some(map) => Value::Object(map),
            None => Value::Object(serde_json::Map::new()),
        };

        self.dispatch(&tool_name, args)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let mut tools = Vec::new();

        for tool_meta in all_tool_metadata() {
            if !self.is_enabled(tool_meta.name) {
                continue;
            }

            // Convert schema Value to Arc<JsonObject>
            let schema_obj = match tool_meta.schema.clone() {
                Value::Object(obj) => Arc::new(obj),
                _ => Arc::new(serde_json::Map::new()),
            };

            tools.push(Tool {
                name: tool_meta.name.into(),
                title: None,
                description: Some(tool_meta.description.into()),
                input_schema: schema_obj,
                output_schema: tool_meta.output_schema.clone().and_then(|schema| match schema {
                    Value::Object(obj) => Some(Arc::new(obj)),
                    _ => None,
                }),
                annotations: None,
                icons: None,
                meta: None,
            });
        }

        log::debug!("Serving {} tools", tools.len());

        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn get_prompt(
        &self,
        _request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        Err(McpError::invalid_request("Prompts not supported", None))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: vec![],
            next_cursor: None,
        })
    }

    /// Resources capability is not advertised; these exist only to satisfy
    /// the ServerHandler trait.
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Err(McpError::invalid_request(
            "Resources not supported",
            Some(json!({
                "message": "This server only supports tools.",
                "uri": request.uri
            })),
        ))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }
}
