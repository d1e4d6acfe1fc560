//! Spawn a local shell and print the screen it paints.
//!
//! Run with: `cargo run --package rterm-term --example unix_shell`

#[cfg(unix)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::thread;
    use std::time::Duration;

    use rterm_term::{TerminalEvent, TerminalRequest, UnixTerminalBuilder};

    let (mut engine, handle, events) = UnixTerminalBuilder::new("/bin/sh")
        .arg("-i")
        .spawn()?;

    handle
        .send(TerminalRequest::WriteBytes(b"echo hi && exit\n".to_vec()))
        .expect("request channel open");

    for _ in 0..50 {
        engine.on_readable()?;
        thread::sleep(Duration::from_millis(20));
    }

    while let Ok(event) = events.try_recv() {
        match event {
            TerminalEvent::Frame { snapshot } => {
                for y in 0..snapshot.height() {
                    let line: String = (0..snapshot.width())
                        .map(|x| {
                            char::from_u32(snapshot.cell(x, y).code_point).unwrap_or(' ')
                        })
                        .collect();
                    println!("{}", line.trim_end());
                }
            }
            TerminalEvent::ChildExit { code } => println!("child exited with {code}"),
            _ => {}
        }
    }

    Ok(())
}

#[cfg(not(unix))]
fn main() {
    eprintln!("unix_shell example is only available on Unix platforms.");
}
