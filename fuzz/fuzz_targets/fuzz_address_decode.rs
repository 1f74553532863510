#![no_main]

use forwarding_crypto::Base32Codec;
use forwarding_types::{is_valid_channel_id, AddressCodec, Coins};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // A successful decode must re-encode to the same string.
    let codec = Base32Codec::new("noble");
    if let Ok(address) = codec.decode(text) {
        assert_eq!(codec.encode(&address), text);
    }

    let _ = text.parse::<Coins>();
    let _ = is_valid_channel_id(text);
});
