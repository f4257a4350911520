//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command opens the store, acts, and lets the store persist.

use super::{Context, ListMode};
use crate::config::BackendKind;
use chrono::NaiveDate;
use leadbook_core::{
    ContactLinks, EditField, EditRequest, FileSlots, FollowUpStatus, Interest, Lead, LeadDraft,
    LeadError, LeadPatch, MemorySlots, RedbSlots, SchedulePreset, SlotBackend, Stage, Store,
    add_days, follow_up_status, score,
};
use std::io::{BufRead, Write};

/// File name of the redb database inside the data directory.
pub const REDB_FILE_NAME: &str = "leadbook.redb";

// =============================================================================
// STORE HELPERS
// =============================================================================

/// Open the store on the configured backend and slot.
pub fn open_store(ctx: &Context) -> Result<Store<SlotBackend>, LeadError> {
    let storage = match ctx.backend {
        BackendKind::File => SlotBackend::File(FileSlots::new(&ctx.data_dir)),
        BackendKind::Redb => {
            std::fs::create_dir_all(&ctx.data_dir).map_err(|e| {
                LeadError::IoError(format!(
                    "Create data directory '{}': {}",
                    ctx.data_dir.display(),
                    e
                ))
            })?;
            SlotBackend::Redb(RedbSlots::open(ctx.data_dir.join(REDB_FILE_NAME))?)
        }
        BackendKind::Memory => SlotBackend::Memory(MemorySlots::new()),
    };

    let store = Store::open_with_key(storage, ctx.config.slot_key.as_str(), ctx.today);
    tracing::debug!(
        backend = store.storage().name(),
        slot = store.slot_key(),
        outcome = ?store.last_load(),
        "store opened"
    );
    Ok(store)
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// Text to print for a mutating command, if any.
///
/// JSON mode always yields the JSON value; `--quiet` silences the human line.
pub fn render(ctx: &Context, value: &serde_json::Value, human: String) -> Option<String> {
    if ctx.json_mode {
        Some(serde_json::to_string_pretty(value).unwrap_or_default())
    } else if ctx.quiet {
        None
    } else {
        Some(human)
    }
}

fn emit(ctx: &Context, value: serde_json::Value, human: String) {
    if let Some(text) = render(ctx, &value, human) {
        println!("{}", text);
    }
}

fn lead_json(lead: &Lead, today: NaiveDate) -> serde_json::Value {
    let mut value = serde_json::to_value(lead).unwrap_or(serde_json::Value::Null);
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("score".to_string(), score(lead, today).into());
    }
    value
}

fn format_follow_up(lead: &Lead, today: NaiveDate) -> String {
    match lead.next_follow_up {
        Some(date) => {
            let tag = follow_up_status(lead, today).tag();
            if tag.is_empty() {
                format!("Próximo: {}", date)
            } else {
                format!("Próximo: {} [{}]", date, tag)
            }
        }
        None => "Sin seguimiento".to_string(),
    }
}

fn print_lead_line(lead: &Lead, today: NaiveDate) {
    let marker = match follow_up_status(lead, today) {
        FollowUpStatus::Overdue => "!",
        FollowUpStatus::Soon => "*",
        FollowUpStatus::None | FollowUpStatus::Scheduled => " ",
    };
    println!(
        "{} {:<16} {:<24} {:<18} {:<16} {}",
        marker,
        lead.id,
        lead.name,
        lead.phone,
        lead.stage,
        format_follow_up(lead, today)
    );
}

fn print_lead_card(lead: &Lead, today: NaiveDate, business: &str) {
    let links = ContactLinks::for_lead(lead, business);
    println!("{} ({})", lead.name, lead.id);
    println!("  Teléfono:  {}", lead.phone);
    if !lead.email.is_empty() {
        println!("  Correo:    {}", lead.email);
    }
    println!("  Etapa:     {}", lead.stage);
    println!(
        "  Interés:   {}",
        lead.interest.map(|i| i.label()).unwrap_or("-")
    );
    println!("  Promotor:  {}", lead.promoter);
    println!("  Origen:    {}", lead.source);
    println!("  Alta:      {}", lead.first_contact);
    println!("  {}", format_follow_up(lead, today));
    if !lead.notes.is_empty() {
        println!("  Notas:     {}", lead.notes);
    }
    println!("  Llamar:    {}", links.dial);
    println!("  WhatsApp:  {}", links.message);
}

// =============================================================================
// LIST / SHOW
// =============================================================================

/// List leads ordered by urgency.
pub fn cmd_list(ctx: &Context, query: &str) -> Result<(), LeadError> {
    let store = open_store(ctx)?;
    let ranked = store.ranked(query, ctx.today);

    if ctx.json_mode {
        let leads: Vec<_> = ranked.iter().map(|l| lead_json(l, ctx.today)).collect();
        print_json(&serde_json::json!({ "today": ctx.today.to_string(), "leads": leads }));
        return Ok(());
    }

    if ranked.is_empty() {
        println!("Sin leads. Crea el primero con `leadbook add`.");
        return Ok(());
    }

    if store.ui().simple_mode {
        for lead in &ranked {
            print_lead_line(lead, ctx.today);
        }
    } else {
        for lead in &ranked {
            print_lead_card(lead, ctx.today, &ctx.config.business_name);
            println!();
        }
    }

    if ctx.verbose {
        println!();
        println!("{} of {} leads shown", ranked.len(), store.leads().len());
    }

    Ok(())
}

/// Show one lead.
pub fn cmd_show(ctx: &Context, id: &str) -> Result<(), LeadError> {
    let store = open_store(ctx)?;
    let lead = store.require(id)?;

    if ctx.json_mode {
        print_json(&lead_json(lead, ctx.today));
    } else {
        print_lead_card(lead, ctx.today, &ctx.config.business_name);
    }
    Ok(())
}

// =============================================================================
// ADD
// =============================================================================

/// Arguments of the `add` command.
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub name: String,
    pub phone: String,
    pub interest: Option<Interest>,
    pub promoter: Option<String>,
    pub follow_up: Option<NaiveDate>,
    pub source: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Quick-add a lead.
pub fn cmd_add(ctx: &Context, args: AddArgs) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;

    let promoter = args.promoter.unwrap_or_else(|| {
        store
            .promoters()
            .first()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    });

    let draft = LeadDraft {
        name: args.name,
        phone: args.phone,
        email: args.email.unwrap_or_default(),
        source: args
            .source
            .unwrap_or_else(|| ctx.config.default_source.clone()),
        interest: args.interest,
        promoter,
        next_follow_up: Some(
            args.follow_up
                .unwrap_or_else(|| add_days(ctx.today, ctx.config.default_follow_up_days)),
        ),
        notes: args.notes.unwrap_or_default(),
    };

    let lead = store.create(draft, ctx.today)?;
    emit(
        ctx,
        lead_json(lead, ctx.today),
        format!("Lead {} creado: {}", lead.id, lead.name),
    );
    Ok(())
}

// =============================================================================
// PIPELINE ACTIONS
// =============================================================================

/// Advance a lead one stage.
pub fn cmd_advance(ctx: &Context, id: &str) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;
    let before = store.require(id)?.stage;
    let after = store
        .advance(id)
        .ok_or_else(|| LeadError::LeadNotFound(id.to_string()))?;

    let human = if before == after {
        format!("{}: ya está en la última etapa ({})", id, after)
    } else {
        format!("{}: {} -> {}", id, before, after)
    };
    emit(
        ctx,
        serde_json::json!({ "id": id, "from": before, "stage": after, "changed": before != after }),
        human,
    );
    Ok(())
}

/// Parsed `schedule` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTarget {
    Preset(SchedulePreset),
    Date(NaiveDate),
    Clear,
}

/// Parse `today`, `tomorrow`, `three-days`, `clear` or a `YYYY-MM-DD` date.
pub fn parse_schedule_target(when: &str) -> Result<ScheduleTarget, LeadError> {
    match when.trim().to_lowercase().as_str() {
        "today" | "hoy" => Ok(ScheduleTarget::Preset(SchedulePreset::Today)),
        "tomorrow" | "mañana" => Ok(ScheduleTarget::Preset(SchedulePreset::Tomorrow)),
        "three-days" | "3d" | "3-dias" => Ok(ScheduleTarget::Preset(SchedulePreset::ThreeDays)),
        "clear" | "none" => Ok(ScheduleTarget::Clear),
        _ => leadbook_core::parse_date(when).map(ScheduleTarget::Date),
    }
}

/// Set or clear the next follow-up.
pub fn cmd_schedule(ctx: &Context, id: &str, when: &str) -> Result<(), LeadError> {
    let target = parse_schedule_target(when)?;
    let mut store = open_store(ctx)?;
    store.require(id)?;

    let next = match target {
        ScheduleTarget::Preset(preset) => store.schedule(id, preset, ctx.today),
        ScheduleTarget::Date(date) => store
            .update(id, LeadPatch::new().next_follow_up(Some(date)))
            .then_some(date),
        ScheduleTarget::Clear => {
            store.update(id, LeadPatch::new().next_follow_up(None));
            None
        }
    };

    let human = match next {
        Some(date) => format!("{}: próximo seguimiento {}", id, date),
        None => format!("{}: sin seguimiento", id),
    };
    emit(
        ctx,
        serde_json::json!({ "id": id, "nextFollowUp": next.map(|d| d.to_string()) }),
        human,
    );
    Ok(())
}

/// Manually set a stage.
pub fn cmd_stage(ctx: &Context, id: &str, stage: Stage) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;
    if !store.update(id, LeadPatch::new().stage(stage)) {
        return Err(LeadError::LeadNotFound(id.to_string()));
    }
    emit(
        ctx,
        serde_json::json!({ "id": id, "stage": stage }),
        format!("{}: etapa {}", id, stage),
    );
    Ok(())
}

/// Delete a lead.
pub fn cmd_remove(ctx: &Context, id: &str) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;
    let removed = store.remove(id);
    let human = if removed {
        format!("Lead {} eliminado", id)
    } else {
        format!("Lead {} no existe; nada que eliminar", id)
    };
    emit(ctx, serde_json::json!({ "id": id, "removed": removed }), human);
    Ok(())
}

// =============================================================================
// EDITS
// =============================================================================

/// Ask for a value on stdin. `None` when input is closed.
///
/// An empty line keeps the current value.
fn prompt_value(request: &EditRequest) -> Result<Option<String>, LeadError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write!(out, "{} [{}] ", request.prompt, request.current)
        .and_then(|()| out.flush())
        .map_err(|e| LeadError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| LeadError::IoError(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }

    let value = line.trim_end_matches(['\r', '\n']);
    if value.is_empty() {
        Ok(Some(request.current.clone()))
    } else {
        Ok(Some(value.to_string()))
    }
}

/// Edit a free-text field, prompting when no value was given.
pub fn cmd_edit(
    ctx: &Context,
    id: &str,
    field: EditField,
    value: Option<String>,
) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;
    let request = store
        .request_edit(id, field)
        .ok_or_else(|| LeadError::LeadNotFound(id.to_string()))?;

    let value = match value {
        Some(v) => v,
        None => match prompt_value(&request)? {
            Some(v) => v,
            None => {
                emit(
                    ctx,
                    serde_json::json!({ "id": id, "field": field.to_string(), "updated": false }),
                    "Sin cambios".to_string(),
                );
                return Ok(());
            }
        },
    };

    store.apply_edit(request.id.as_str(), request.field, value.clone())?;
    emit(
        ctx,
        serde_json::json!({ "id": id, "field": field.to_string(), "value": value, "updated": true }),
        format!("{}: {} actualizado", id, field),
    );
    Ok(())
}

// =============================================================================
// LINKS / PROMOTERS / MODE
// =============================================================================

/// Print contact links.
pub fn cmd_links(ctx: &Context, id: &str) -> Result<(), LeadError> {
    let store = open_store(ctx)?;
    let lead = store.require(id)?;
    let links = ContactLinks::for_lead(lead, &ctx.config.business_name);

    if ctx.json_mode {
        print_json(&serde_json::to_value(&links).unwrap_or(serde_json::Value::Null));
    } else {
        println!("Llamar:   {}", links.dial);
        println!("WhatsApp: {}", links.message);
    }
    Ok(())
}

/// List promoters.
pub fn cmd_promoters(ctx: &Context) -> Result<(), LeadError> {
    let store = open_store(ctx)?;

    if ctx.json_mode {
        print_json(&serde_json::to_value(store.promoters()).unwrap_or(serde_json::Value::Null));
        return Ok(());
    }

    for promoter in store.promoters() {
        let assigned = store
            .leads()
            .iter()
            .filter(|l| l.promoter == promoter.name)
            .count();
        println!("{:<6} {:<24} {} leads", promoter.id, promoter.name, assigned);
    }
    Ok(())
}

/// Switch listing layout.
pub fn cmd_mode(ctx: &Context, mode: ListMode) -> Result<(), LeadError> {
    let mut store = open_store(ctx)?;
    let simple = mode == ListMode::Simple;
    store.set_simple_mode(simple);
    emit(
        ctx,
        serde_json::json!({ "simpleMode": simple }),
        format!("Modo {}", if simple { "simple" } else { "detallado" }),
    );
    Ok(())
}

// =============================================================================
// STATUS / RESET
// =============================================================================

/// Show storage and pipeline summary.
pub fn cmd_status(ctx: &Context) -> Result<(), LeadError> {
    let store = open_store(ctx)?;
    let leads = store.leads();

    let per_stage: Vec<(Stage, usize)> = Stage::ALL
        .into_iter()
        .map(|stage| (stage, leads.iter().filter(|l| l.stage == stage).count()))
        .collect();
    let overdue = leads
        .iter()
        .filter(|l| follow_up_status(l, ctx.today) == FollowUpStatus::Overdue)
        .count();
    let soon = leads
        .iter()
        .filter(|l| follow_up_status(l, ctx.today) == FollowUpStatus::Soon)
        .count();

    if ctx.json_mode {
        let stages: serde_json::Map<String, serde_json::Value> = per_stage
            .iter()
            .map(|(stage, count)| (stage.label().to_string(), (*count).into()))
            .collect();
        print_json(&serde_json::json!({
            "backend": ctx.backend.name(),
            "data_dir": ctx.data_dir.to_string_lossy(),
            "slot": store.slot_key(),
            "load": format!("{:?}", store.last_load()),
            "today": ctx.today.to_string(),
            "leads": leads.len(),
            "promoters": store.promoters().len(),
            "overdue": overdue,
            "soon": soon,
            "stages": stages,
        }));
        return Ok(());
    }

    println!("Leadbook Status");
    println!("===============");
    println!("Backend:   {}", ctx.backend.name());
    println!("Data:      {}", ctx.data_dir.display());
    println!("Slot:      {}", store.slot_key());
    println!("Load:      {:?}", store.last_load());
    println!("Today:     {}", ctx.today);
    println!();
    println!("Leads:     {}", leads.len());
    println!("Promoters: {}", store.promoters().len());
    println!("Overdue:   {}", overdue);
    println!("Soon:      {}", soon);
    println!();
    for (stage, count) in per_stage {
        println!("  {:<16} {}", stage.label(), count);
    }
    Ok(())
}

/// Replace all data with seed data.
pub fn cmd_reset(ctx: &Context, force: bool) -> Result<(), LeadError> {
    if !force {
        return Err(LeadError::InvalidInput(
            "Reset discards every lead. Use --force to confirm.".to_string(),
        ));
    }
    let mut store = open_store(ctx)?;
    store.reset(ctx.today);
    let count = store.leads().len();
    emit(
        ctx,
        serde_json::json!({ "reset": true, "leads": count }),
        format!("Datos de ejemplo restaurados ({} leads)", count),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ctx(json_mode: bool, quiet: bool) -> Context {
        Context {
            config: Config::default(),
            backend: BackendKind::Memory,
            data_dir: std::path::PathBuf::from("."),
            today: NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date"),
            json_mode,
            verbose: false,
            quiet,
        }
    }

    #[test]
    fn render_human_line_by_default() {
        let value = serde_json::json!({ "id": "C-001", "stage": Stage::Interested });
        let out = render(&ctx(false, false), &value, "C-001: etapa Interesado".to_string());
        assert_eq!(out.as_deref(), Some("C-001: etapa Interesado"));
    }

    #[test]
    fn render_json_mode_emits_object() {
        let value = serde_json::json!({ "id": "C-001", "stage": Stage::Interested });
        let out = render(&ctx(true, false), &value, "ignored".to_string()).expect("output");

        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(parsed["id"], "C-001");
        assert_eq!(parsed["stage"], "Interesado");
    }

    #[test]
    fn render_quiet_silences_human_line_only() {
        let value = serde_json::json!({ "removed": true });
        assert_eq!(render(&ctx(false, true), &value, "Lead eliminado".to_string()), None);
        assert!(render(&ctx(true, true), &value, "Lead eliminado".to_string()).is_some());
    }
}
