mod mock_ocr_engine;
mod remote_ocr_adapter;

pub use mock_ocr_engine::MockOcrEngine;
pub use remote_ocr_adapter::RemoteOcrAdapter;
