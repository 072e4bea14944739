mod in_memory_trade;

pub use in_memory_trade::InMemoryTradeRepository;
