//! Renderers for each template kind
//!
//! Renderers never fail on sparse options: every placeholder has a default.
//! Output is raw text; formatting happens in the generation manager.

use serde_json::{Map, Value};
use tracing::debug;

use super::resolver::{CaseTransform, PlaceholderResolver};
use super::{ts_string, TemplateKind};
use crate::error::Result;

/// Loosely-typed options bag passed to a renderer
pub type TemplateOptions = Map<String, Value>;

const COLLECTION_TEMPLATE: &str = r#"import type { CollectionConfig } from 'payload/types';

const {{identifier}}: CollectionConfig = {
  slug: {{slugLiteral}},
  admin: {
    useAsTitle: 'title',
  },
  fields: [
    { name: 'title', type: 'text', required: true },
  ],
};

export default {{identifier}};
"#;

const GLOBAL_TEMPLATE: &str = r#"import type { GlobalConfig } from 'payload/types';

const {{identifier}}: GlobalConfig = {
  slug: {{slugLiteral}},
  fields: [
    { name: 'siteName', type: 'text' },
  ],
};

export default {{identifier}};
"#;

const HOOK_TEMPLATE: &str = r#"import type { {{hookType}} } from 'payload/types';

export const {{name}}: {{hookType}} = async (args) => {
  console.log('Running {{stage}} hook...');
  // Your logic here
  return {{returned}};
};
"#;

const ACCESS_CONTROL_TEMPLATE: &str = r#"import type { Access } from 'payload/types';

export const {{name}}: Access = ({ req: { user } }) => {
  // Your logic here
  return Boolean(user);
};
"#;

const ENDPOINT_TEMPLATE: &str = r#"import type { NextFunction, Request, Response } from 'express';

export const {{name}} = async (req: Request, res: Response, next: NextFunction) => {
  try {
    // Your logic here
    res.json({ message: 'Custom endpoint reached' });
  } catch (error) {
    next(error);
  }
};
"#;

const COMPONENT_TEMPLATE: &str = r#"import React from 'react';

interface {{name}}Props {
  // Define props
}

const {{name}}: React.FC<{{name}}Props> = (props) => {
  return (
    <div>
      {/* Your component JSX */}
      Hello from {{name}}
    </div>
  );
};

export default {{name}};
"#;

const PLUGIN_TEMPLATE: &str = r#"import type { Config, Plugin } from 'payload/config';

export const {{name}} = (pluginOptions: Record<string, unknown> = {}): Plugin =>
  (incomingConfig: Config): Config => {
    const config = { ...incomingConfig };
    console.log({{nameLiteral}} + ' initialized');
    // Modify config.collections, config.hooks, ... here
    return config;
  };
"#;

const TEST_TEMPLATE: &str = r#"describe({{nameLiteral}}, () => {
  beforeAll(async () => {
    // Setup tests
  });

  it('should do something correctly', () => {
    expect(true).toBe(true);
  });

  afterAll(async () => {
    // Teardown tests
  });
});
"#;

const MIGRATION_TEMPLATE: &str = r#"import type { MigrateDownArgs, MigrateUpArgs } from '@payloadcms/db-{{adapter}}';

export async function up({ payload }: MigrateUpArgs): Promise<void> {
  payload.logger.info('Running migration up...');
  // Apply schema or data changes
}

export async function down({ payload }: MigrateDownArgs): Promise<void> {
  payload.logger.info('Running migration down...');
  // Revert the changes made in up()
}
"#;

const CUSTOM_ROUTE_TEMPLATE: &str = r#"// Express
// router.get({{pathLiteral}}, (req, res) => { res.json({ message: 'Custom route' }); });

// Next.js route handler at app{{path}}/route.ts
export async function GET(): Promise<Response> {
  return Response.json({ message: 'Custom route' });
}
"#;

const GENERIC_FUNCTION_TEMPLATE: &str = r#"export function {{name}}(): void {
  // Function logic here
  console.log('Executing {{name}}');
}
"#;

const GENERIC_CLASS_TEMPLATE: &str = r#"export class {{name}} {
  constructor() {
    // Initialize properties
  }

  myMethod(): void {
    console.log('Method in {{name}} called');
  }
}
"#;

impl TemplateKind {
    /// Renders this template kind from an options bag
    pub fn render(self, options: &TemplateOptions) -> Result<String> {
        debug!(kind = %self, "Rendering template");

        match self {
            TemplateKind::Collection => Ok(render_collection(options)),
            TemplateKind::Global => Ok(render_global(options)),
            TemplateKind::Field => render_field(options),
            TemplateKind::Hook => Ok(render_hook(options)),
            TemplateKind::AccessControl => Ok(render_named(
                ACCESS_CONTROL_TEMPLATE,
                options,
                "isLoggedIn",
            )),
            TemplateKind::Endpoint => Ok(render_named(ENDPOINT_TEMPLATE, options, "customHandler")),
            TemplateKind::Component => Ok(render_named(COMPONENT_TEMPLATE, options, "MyComponent")),
            TemplateKind::Plugin => Ok(render_named(PLUGIN_TEMPLATE, options, "myPlugin")),
            TemplateKind::Test => Ok(render_named(TEST_TEMPLATE, options, "myTest")),
            TemplateKind::Migration => Ok(render_migration(options)),
            TemplateKind::CustomRoute => Ok(render_custom_route(options)),
            TemplateKind::GenericFunction => Ok(render_named(
                GENERIC_FUNCTION_TEMPLATE,
                options,
                "myFunction",
            )),
            TemplateKind::GenericClass => {
                Ok(render_named(GENERIC_CLASS_TEMPLATE, options, "MyClass"))
            }
        }
    }
}

/// Label with whitespace removed, falling back to the PascalCase slug
fn identifier_for(label: &str, slug: &str) -> String {
    let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        CaseTransform::PascalCase.apply(slug)
    } else {
        compact
    }
}

fn render_collection(options: &TemplateOptions) -> String {
    let mut resolver =
        PlaceholderResolver::from_options(options, &[("slug", "new-items"), ("plural", "New Items")]);
    let slug = resolver.resolve("slug").unwrap_or_default().to_string();
    let plural = resolver.resolve("plural").unwrap_or_default().to_string();

    resolver.add_value("identifier", identifier_for(&plural, &slug));
    resolver.add_value("slugLiteral", ts_string(&slug));
    resolver.render(COLLECTION_TEMPLATE)
}

fn render_global(options: &TemplateOptions) -> String {
    let mut resolver = PlaceholderResolver::from_options(
        options,
        &[("slug", "site-settings"), ("singular", "Site Settings")],
    );
    let slug = resolver.resolve("slug").unwrap_or_default().to_string();
    let singular = resolver.resolve("singular").unwrap_or_default().to_string();

    resolver.add_value("identifier", identifier_for(&singular, &slug));
    resolver.add_value("slugLiteral", ts_string(&slug));
    resolver.render(GLOBAL_TEMPLATE)
}

fn render_field(options: &TemplateOptions) -> Result<String> {
    Ok(serde_json::to_string_pretty(options)?)
}

fn render_hook(options: &TemplateOptions) -> String {
    let mut resolver =
        PlaceholderResolver::from_options(options, &[("stage", "beforeChange"), ("name", "myHook")]);
    let stage = resolver.resolve("stage").unwrap_or_default().to_string();

    let returned = if stage.starts_with("before") && stage != "beforeRead" {
        "args.data"
    } else {
        "args.doc"
    };
    resolver.add_value(
        "hookType",
        format!("Collection{}Hook", CaseTransform::PascalCase.apply(&stage)),
    );
    resolver.add_value("returned", returned);
    resolver.render(HOOK_TEMPLATE)
}

fn render_named(template: &str, options: &TemplateOptions, default_name: &str) -> String {
    let mut resolver = PlaceholderResolver::from_options(options, &[("name", default_name)]);
    let name = resolver.resolve("name").unwrap_or_default().to_string();
    resolver.add_value("nameLiteral", ts_string(&name));
    resolver.render(template)
}

fn render_migration(options: &TemplateOptions) -> String {
    let resolver = PlaceholderResolver::from_options(options, &[("adapter", "postgres")]);
    resolver.render(MIGRATION_TEMPLATE)
}

fn render_custom_route(options: &TemplateOptions) -> String {
    let mut resolver = PlaceholderResolver::from_options(options, &[("path", "/custom")]);
    let path = resolver.resolve("path").unwrap_or_default().to_string();
    resolver.add_value("pathLiteral", ts_string(&path));
    resolver.render(CUSTOM_ROUTE_TEMPLATE)
}
