//! Text templates for multi-line replies.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// A named template source.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Template {
    name: &'static str,
    source: &'static str,
}

/// Lists the failed segments of a compound message.
pub(crate) const BATCH_REPORT: Template = Template {
    name: "batch_report",
    source: "{% for entry in failures %}\
**{% if entry.segment %}{{ entry.segment }}{% else %}(empty){% endif %}**: {{ entry.reason }}
{% endfor %}",
};

/// Lists every known cog with its status.
pub(crate) const COG_LIST: Template = Template {
    name: "cog_list",
    source: "{% for cog in cogs %}\
`{{ cog.name }}`: {{ cog.status }}
{% endfor %}",
};

/// Lists visible commands grouped by cog.
pub(crate) const HELP_OVERVIEW: Template = Template {
    name: "help_overview",
    source: "Use `{{ prefix }}help <command>` for details on a command or cog.
{% for group in groups %}
**{{ group.title }}**
{% for command in group.commands %}\
`{{ command.name }}`{% if command.aliases %} ({{ command.aliases | join(\", \") }}){% endif %}\
{% if command.help %}: {{ command.help }}{% endif %}
{% endfor %}{% endfor %}",
};

/// Describes one command and its subcommands.
pub(crate) const HELP_COMMAND: Template = Template {
    name: "help_command",
    source: "`{{ prefix }}{{ name }}`{% if aliases %} (aliases: {{ aliases | join(\", \") }}){% endif %}
{{ help }}
{% if subcommands %}
**Subcommands**
{% for sub in subcommands %}\
`{{ sub.name }}`{% if sub.help %}: {{ sub.help }}{% endif %}
{% endfor %}{% endif %}",
};

/// Rendering failure.
#[derive(Debug, Clone, Error)]
#[error("template '{name}' failed to render: {reason}")]
pub(crate) struct TemplateError {
    name: &'static str,
    reason: String,
}

/// Renders `template` with `context`, trimming trailing whitespace.
pub(crate) fn render(template: Template, context: impl Serialize) -> Result<String, TemplateError> {
    let environment = Environment::new();
    environment
        .render_str(template.source, context)
        .map(|rendered| rendered.trim_end().to_owned())
        .map_err(|error| TemplateError {
            name: template.name,
            reason: error.to_string(),
        })
}
