// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

use devnotify_hid::{ConnectionManager, DeviceSignature, HidApiTransport, HotplugWatcher, LogSink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Watch the CH340-based demo device
    let signature = DeviceSignature::new(0x1A86, 0xFE07);

    let transport = HidApiTransport::new()?;

    // The constructor already tries to connect once in case the device
    // is plugged in before we start watching
    let mut manager = ConnectionManager::new(transport, LogSink, signature);

    let mut watcher = HotplugWatcher::subscribe()?;
    println!("Watching for {}...", signature.match_token());

    // Blocks until the subscription shuts down
    manager.run(watcher.events());
    watcher.unsubscribe();

    Ok(())
}
