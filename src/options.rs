//! Engine-wide tunables (hash size, thread count, time management
//! percentages, and friends), together with the UCI-style `setoption`
//! parser that mutates them at runtime.

/// Default transposition table size, in megabytes, used when no `Hash`
/// option has been set yet.
pub const DEFAULT_HASH_MB: usize = 16;

/// Mutable engine configuration. `Engine::set_option` is the only writer;
/// everything else just reads through `Engine::options`.
#[derive(Clone, Debug)]
pub struct EngineOptions {
    pub hash_mb: usize,
    pub threads: usize,
    pub move_overhead_ms: u64,
    pub soft_time_percent: u64,
    pub hard_time_percent: u64,
    pub max_nodes: u64,
    pub multi_pv: u32,
    pub ponder: bool,
}

impl EngineOptions {
    #[must_use]
    pub fn new() -> Self {
        EngineOptions {
            hash_mb: DEFAULT_HASH_MB,
            threads: 1,
            move_overhead_ms: 50,
            soft_time_percent: 70,
            hard_time_percent: 90,
            max_nodes: 0,
            multi_pv: 1,
            ponder: false,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// What changed as a result of `apply_setoption`, beyond the plain field
/// mutation already visible on `EngineOptions` -- some options require the
/// caller to take an extra action (reinitializing the hash table, resizing
/// the worker pool) that `EngineOptions` alone can't perform.
pub enum OptionAction {
    ReinitHash(usize),
    SetThreads(usize),
}

/// Applies one `name`/`value` pair (already split out of a `setoption name
/// ... value ...` command) to `opts`. Unknown option names are ignored
/// rather than rejected, matching how real UCI clients probe for options
/// speculatively.
pub fn apply_setoption(opts: &mut EngineOptions, name: &str, value: Option<&str>) -> Option<OptionAction> {
    let normalized = name.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "hash" => {
            let mb = value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(DEFAULT_HASH_MB).max(1);
            if mb != opts.hash_mb {
                opts.hash_mb = mb;
                return Some(OptionAction::ReinitHash(mb));
            }
        }
        "threads" => {
            let threads = value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(1).clamp(1, 256);
            if threads != opts.threads {
                opts.threads = threads;
                return Some(OptionAction::SetThreads(threads));
            }
        }
        "move overhead" => {
            if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                opts.move_overhead_ms = v;
            }
        }
        "soft time percent" => {
            if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                opts.soft_time_percent = v.clamp(1, 100);
            }
        }
        "hard time percent" => {
            if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                opts.hard_time_percent = v.clamp(1, 100);
            }
        }
        "max nodes" => {
            if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                opts.max_nodes = v;
            }
        }
        "multipv" => {
            if let Some(v) = value.and_then(|v| v.parse::<u32>().ok()) {
                opts.multi_pv = v.clamp(1, 64);
            }
        }
        "ponder" => {
            if let Some(v) = value {
                opts.ponder = matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1");
            }
        }
        _ => {}
    }
    None
}

/// Splits a raw `setoption name <name> value <value>` command line into its
/// name/value parts. Returns `None` if the line isn't a `setoption` command
/// or carries no option name.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.is_empty() || parts[0] != "setoption" {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() { None } else { Some(value_parts.join(" ")) };
    Some((name, value))
}
