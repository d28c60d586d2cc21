//! Command registry: names and aliases to handlers.
//!
//! Registration is static and happens once at startup (see
//! [`commands::builtin`](crate::commands::builtin)); this is not a plugin
//! system. Lookup is case-insensitive. Whether a command requires
//! elevation is declarative metadata on its [`CommandSpec`], consulted
//! centrally by the dispatcher rather than re-checked inside every
//! handler.
//!
//! Aliases are stored as a separate alias-to-canonical map and resolved
//! indirectly at lookup time, never bound to a handler reference, so
//! replacing a handler also replaces what its aliases run.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::parse::Invocation;

/// Type-erased command handler.
pub type Handler =
    Arc<dyn Fn(Invocation, Arc<CommandContext>) -> BoxFuture<'static, CommandResult> + Send + Sync>;

/// A registered command: its canonical name, elevation requirement, and
/// handler.
#[derive(Clone)]
pub struct CommandSpec {
    name: String,
    elevated: bool,
    handler: Handler,
}

impl CommandSpec {
    /// The canonical (lowercase) command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the dispatcher must authorise the actor before invoking.
    pub fn elevated(&self) -> bool {
        self.elevated
    }

    /// Runs the handler.
    pub fn invoke(
        &self,
        invocation: Invocation,
        ctx: Arc<CommandContext>,
    ) -> BoxFuture<'static, CommandResult> {
        (self.handler)(invocation, ctx)
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("elevated", &self.elevated)
            .finish()
    }
}

/// Maps command names (and aliases) to handlers.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<CommandSpec>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under the lowercased name.
    ///
    /// An already-registered name is overwritten silently; aliases keep
    /// working because they resolve through the canonical name.
    pub fn register<F, Fut>(&mut self, name: &str, elevated: bool, handler: F)
    where
        F: Fn(Invocation, Arc<CommandContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResult> + Send + 'static,
    {
        let name = name.to_lowercase();
        let handler: Handler = Arc::new(move |inv, ctx| Box::pin(handler(inv, ctx)));
        let spec = Arc::new(CommandSpec {
            name: name.clone(),
            elevated,
            handler,
        });
        if self.commands.insert(name.clone(), spec).is_some() {
            debug!(command = %name, "Replaced existing command registration");
        }
    }

    /// Binds alias names to a canonical command name.
    pub fn alias<'a>(&mut self, canonical: &str, aliases: impl IntoIterator<Item = &'a str>) {
        let canonical = canonical.to_lowercase();
        for alias in aliases {
            self.aliases.insert(alias.to_lowercase(), canonical.clone());
        }
    }

    /// Case-insensitive lookup, following one alias hop.
    pub fn resolve(&self, name: &str) -> Option<Arc<CommandSpec>> {
        let name = name.to_lowercase();
        if let Some(spec) = self.commands.get(&name) {
            return Some(Arc::clone(spec));
        }
        self.aliases
            .get(&name)
            .and_then(|canonical| self.commands.get(canonical))
            .map(Arc::clone)
    }

    /// The number of registered commands, aliases excluded.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.len())
            .field("aliases", &self.aliases.len())
            .finish()
    }
}
