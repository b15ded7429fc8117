//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# vtbridge configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[shell]
# program = ""            # empty: use $SHELL, falling back to /bin/sh
# args = []
# working_directory = "/home/me"
# backend = "pipe"        # pipe, pty
# cols = 80               # 2-1000 (pty only)
# rows = 24               # 1-500 (pty only)

[shell.env]
# EDITOR = "vi"

[session]
# max_output_chars = 100000   # 1024-10000000
# read_chunk_size = 8192      # 256-1048576

[input]
# bracketed_paste = false
# reject_unsafe_paste = true
# cursor_key_application = false
# keypad_application = false
# alt_sends_escape = true
# kitty_disambiguate = false

[logging]
# level = "info"          # trace, debug, info, warn, error
"##
}
