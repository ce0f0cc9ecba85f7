//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# webpanel configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[loading]
# pre_loading_time_ms = 100     # delay before the loading panel appears
# min_loading_time_ms = 1000    # loading panel stays up at least this long
# max_loading_time_ms = 15000   # give up this long after the loading panel appears

[guest]
# url = "https://panel.example.com/"
# enabled = true
# allowed_origins = []          # e.g. ["https://*.example.com", "https://cdn.example.net:8443"]
# admin_blocked_patterns = []   # e.g. ["https://panel.example.com/blocked*"]
# login_origins = ["https://accounts.google.com"]
# enable_popups = false
# dev_mode = false              # disables the origin allowlist
# reload_after_navigation = false

[window]
# width = 400                   # 50-10000
# height = 600
# login_width = 600
# login_height = 700
# debug_width = 800
# debug_height = 900
# status_width = 400
# status_height = 120
# resize_duration_ms = 0

[debug]
# enable_debug = false
# simulate_offline = false
# log_host_calls = false

[network]
# probe_interval_ms = 5000
# probe_timeout_ms = 2000

[logging]
# level = "info"                # trace, debug, info, warn, error
"##
    .to_string()
}
