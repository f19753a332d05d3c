fn main() {
    // Default mock-service latency, overridable at build time for demo builds
    const FALLBACK_DELAY_MS: u64 = 300;

    let delay_ms = match std::env::var("SCRIPTURE_SERVICE_DELAY_MS") {
        Ok(raw) if !raw.is_empty() => match raw.trim().parse::<u64>() {
            Ok(value) => value,
            Err(e) => {
                println!(
                    "cargo:warning=Ignoring SCRIPTURE_SERVICE_DELAY_MS={:?}: {}",
                    raw, e
                );
                FALLBACK_DELAY_MS
            }
        },
        _ => FALLBACK_DELAY_MS,
    };

    println!("cargo:rustc-env=BUILTIN_SERVICE_DELAY_MS={}", delay_ms);
    println!("cargo:rerun-if-env-changed=SCRIPTURE_SERVICE_DELAY_MS");

    tauri_build::build()
}
