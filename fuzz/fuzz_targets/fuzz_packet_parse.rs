#![no_main]

use forwarding_messages::{FungibleTokenPacketData, RegisterAccountData, Tx};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Inbound packet payloads come straight off the wire; none of these may panic.
    if let Some(transfer) = FungibleTokenPacketData::from_bytes(data) {
        let _ = transfer.forwarding_directive("noble");
    }
    let _ = RegisterAccountData::from_bytes(data);
    let _ = serde_json::from_slice::<Tx>(data);

    // Treat the input as a memo too.
    if let Ok(memo) = std::str::from_utf8(data) {
        let transfer = FungibleTokenPacketData {
            memo: memo.to_string(),
            ..Default::default()
        };
        let _ = transfer.forwarding_directive("noble");
    }
});
