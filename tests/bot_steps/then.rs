//! Then steps for bot behaviour scenarios.

use rstest_bdd_macros::then;

use super::world::BotWorld;

#[then("{count:usize} segments are executed")]
fn segments_executed(world: &BotWorld, count: usize) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no message has been sent"))?;
    let executed = result.executed_count();
    if executed != count {
        return Err(eyre::eyre!("expected {count} executed segments, found {executed}"));
    }
    Ok(())
}

#[then("no error summary is sent")]
fn no_error_summary(world: &BotWorld) -> Result<(), eyre::Report> {
    let responses = world.harness()?.responses();
    if !responses.is_empty() {
        return Err(eyre::eyre!("unexpected responses: {responses:?}"));
    }
    Ok(())
}

#[then(r#"the error summary lists "{segment}" as "{reason}""#)]
fn summary_lists(world: &BotWorld, segment: String, reason: String) -> Result<(), eyre::Report> {
    let body = world
        .harness()?
        .last_body()
        .ok_or_else(|| eyre::eyre!("no error summary was sent"))?;
    let expected = format!("**{segment}**: {reason}");
    if !body.contains(&expected) {
        return Err(eyre::eyre!("summary {body:?} does not contain {expected:?}"));
    }
    Ok(())
}

#[then(r#"the reply is "{body}""#)]
fn reply_is(world: &BotWorld, body: String) -> Result<(), eyre::Report> {
    let last = world.harness()?.last_body();
    if last.as_deref() != Some(body.as_str()) {
        return Err(eyre::eyre!("expected reply {body:?}, found {last:?}"));
    }
    Ok(())
}

#[then("nothing is sent")]
fn nothing_sent(world: &BotWorld) -> Result<(), eyre::Report> {
    let sent = world.harness()?.transport.sent();
    if !sent.is_empty() {
        return Err(eyre::eyre!("unexpected output: {sent:?}"));
    }
    Ok(())
}

#[then(r#"the cog "{name}" is "{status}""#)]
fn cog_status(world: &BotWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let states = world.harness()?.bot.cogs().list();
    let state = states
        .iter()
        .find(|state| state.name().as_str() == name)
        .ok_or_else(|| eyre::eyre!("no cog named {name}"))?;
    if state.status_label() != status {
        return Err(eyre::eyre!(
            "expected cog {name} to be {status}, found {}",
            state.status_label()
        ));
    }
    Ok(())
}

#[then(r#"the last text is "{text}""#)]
fn last_text(world: &BotWorld, text: String) -> Result<(), eyre::Report> {
    let texts = world.harness()?.transport.texts();
    if texts.last() != Some(&text) {
        return Err(eyre::eyre!("expected last text {text:?}, found {texts:?}"));
    }
    Ok(())
}
