use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Routes each formatted event to the console method matching its level.
pub struct Console;

pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> ConsoleWriter {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::with_capacity(128),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleWriter {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::with_capacity(128),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(data);

        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ConsoleWriter {
    fn line(&self) -> Option<String> {
        match self.buffer.is_empty() {
            true => None,
            false => Some(String::from_utf8_lossy(&self.buffer).trim_end().to_owned()),
        }
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = match self.line() {
            Some(line) => JsValue::from_str(&line),
            None => return,
        };

        match self.level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }
}

pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_max_level(Level::DEBUG)
        .with_writer(Console)
        .try_init();

    if let Err(error) = subscriber {
        console::warn_1(&JsValue::from_str(&format!("tracing already set up -> {}", error)));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::io::Write;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn console_writer() {
        let mut test_writer = Console.make_writer();

        assert_eq!(test_writer.level, Level::INFO);
        assert!(test_writer.line().is_none());

        assert_eq!(test_writer.write(b"add credential ").unwrap(), 15);
        assert_eq!(test_writer.write(b"settled\n").unwrap(), 8);
        test_writer.flush().unwrap();

        assert_eq!(test_writer.line().as_deref(), Some("add credential settled"));
    }

    #[wasm_bindgen_test]
    fn init_tracing_twice() {
        init_tracing();
        init_tracing();

        tracing::error!("routed to console.error");
        tracing::warn!("routed to console.warn");
        tracing::info!("routed to console.info");
        tracing::debug!("routed to console.debug");
    }
}
