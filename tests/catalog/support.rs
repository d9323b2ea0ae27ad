use std::sync::Arc;

use serde_json::json;
use command_chain::{Catalog, CatalogFactory, ChainError, Command, Context, ContextExt, Filter, Link};

pub fn append(ctx: &mut dyn Context, id: &str) -> Result<(), ChainError> {
    let log = match ctx.get_str("log") {
        Some(existing) => format!("{}/{}", existing, id),
        None => id.to_string(),
    };
    ctx.put("log", json!(log))?;
    Ok(())
}

pub fn log(ctx: &dyn Context) -> String {
    ctx.get_str("log").unwrap_or_default()
}

/// Logs its id and returns a fixed result.
pub fn step(id: &'static str, result: bool) -> Link {
    Link::from_fn(move |ctx| {
        append(ctx, id)?;
        Ok(result)
    })
}

/// A filter that logs `id` on execute and `"{id}p"` on postprocess.
pub struct Cleanup {
    pub id: &'static str,
    pub handles: bool,
}

impl Command for Cleanup {
    fn execute(&self, ctx: &mut dyn Context) -> Result<bool, ChainError> {
        append(ctx, self.id)?;
        Ok(true)
    }
}

impl Filter for Cleanup {
    fn postprocess(
        &self,
        ctx: &mut dyn Context,
        _error: Option<&ChainError>,
    ) -> Result<bool, ChainError> {
        append(ctx, &format!("{}p", self.id))?;
        Ok(self.handles)
    }
}

/// A factory with a default catalog holding `"main"` and an `"auth"`
/// catalog holding `"check"` (a filter) and `"deny"`.
pub fn populated() -> Arc<CatalogFactory> {
    let factory = Arc::new(CatalogFactory::new());
    factory.set_default_catalog(Arc::new(Catalog::new().with_command("main", step("main", false))));
    factory.add_catalog(
        "auth",
        Arc::new(
            Catalog::new()
                .with_command(
                    "check",
                    Link::filter(Cleanup {
                        id: "check",
                        handles: true,
                    }),
                )
                .with_command("deny", step("deny", true)),
        ),
    );
    factory
}
