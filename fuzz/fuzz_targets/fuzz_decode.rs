#![no_main]

use batch_store::protocol::Request;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must never panic the decoder; short reads and garbage
// tags have to surface as errors or decoded requests.
fuzz_target!(|data: &[u8]| {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    rt.block_on(async {
        let mut reader = data;
        while let Ok(request) = Request::decode(&mut reader).await {
            let _ = request;
            if reader.is_empty() {
                break;
            }
        }
    });
});
