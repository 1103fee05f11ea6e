use super::record::{Category, ComponentRecord};

/// Hand-authored records for the components the built-in recipes rely on.
pub fn builtin_records() -> Vec<ComponentRecord> {
    vec![
        // Input/Output
        ComponentRecord::new("ChatInput", Category::InputOutput)
            .with_display_name("Chat Input")
            .with_description("Get chat inputs from the Playground")
            .with_required_input("input_value", "str", "Input Text")
            .with_input("should_store_message", "bool", "Store Messages")
            .with_input("sender", "str", "Sender Type")
            .with_input("files", "file", "Files")
            .with_output("message", "Message", "Message")
            .with_use_cases(["chat interfaces", "user input", "conversation starters"])
            .with_connections(["LanguageModel", "Agent", "ChatOutput"]),
        ComponentRecord::new("ChatOutput", Category::InputOutput)
            .with_display_name("Chat Output")
            .with_description("Display chat outputs in the Playground")
            .with_required_input("input_value", "Message", "Text")
            .with_input("should_store_message", "bool", "Store Messages")
            .with_use_cases(["displaying results", "chat responses", "final output"])
            .with_connections(["LanguageModel", "Agent", "ChatInput"]),
        ComponentRecord::new("TextInput", Category::InputOutput)
            .with_display_name("Text Input")
            .with_description("Get text inputs from the Playground")
            .with_required_input("input_value", "str", "Text")
            .with_output("text", "Message", "Text")
            .with_use_cases(["static text input", "prompts", "templates"])
            .with_connections(["LanguageModel", "Agent"]),
        // Models
        ComponentRecord::new("LanguageModel", Category::Models)
            .with_display_name("Language Model")
            .with_description("Generic language model for text generation and chat completion")
            .with_required_input("input_value", "Message", "Input")
            .with_input("model_name", "str", "Model Name")
            .with_input("temperature", "float", "Temperature")
            .with_input("max_tokens", "int", "Max Tokens")
            .with_input("api_key", "str", "API Key")
            .with_output("text_output", "Message", "Text")
            .with_output("model_output", "LanguageModel", "Language Model")
            .with_use_cases(["text generation", "chat completion", "question answering"])
            .with_connections(["ChatInput", "Agent", "ChatOutput"]),
        ComponentRecord::new("OpenAIModel", Category::Models)
            .with_display_name("OpenAI")
            .with_description("OpenAI language models (GPT-3.5, GPT-4, etc.)")
            .with_required_input("input_value", "Message", "Input")
            .with_input("model_name", "str", "Model Name")
            .with_input("temperature", "float", "Temperature")
            .with_input("max_tokens", "int", "Max Tokens")
            .with_input("api_key", "str", "OpenAI API Key")
            .with_output("text_output", "Message", "Text")
            .with_output("model_output", "LanguageModel", "Language Model")
            .with_use_cases(["text generation", "chat completion", "question answering"])
            .with_connections(["ChatInput", "Agent", "ChatOutput"]),
        ComponentRecord::new("AnthropicModel", Category::Models)
            .with_display_name("Anthropic")
            .with_description("Anthropic Claude models")
            .with_required_input("input_value", "Message", "Input")
            .with_input("model_name", "str", "Model Name")
            .with_input("temperature", "float", "Temperature")
            .with_input("max_tokens", "int", "Max Tokens")
            .with_input("api_key", "str", "Anthropic API Key")
            .with_output("text_output", "Message", "Text")
            .with_output("model_output", "LanguageModel", "Language Model")
            .with_use_cases(["text generation", "analysis", "reasoning tasks"])
            .with_connections(["ChatInput", "Agent", "ChatOutput"]),
        // Agents
        ComponentRecord::new("Agent", Category::Agents)
            .with_description("AI agent that can use tools and follow instructions")
            .with_required_input("llm", "LanguageModel", "Language Model")
            .with_input("tools", "Tool", "Tools")
            .with_input("agent_llm", "LanguageModel", "Agent LLM")
            .with_input("system_message", "str", "System Message")
            .with_input("user_message", "Message", "User Message")
            .with_output("response", "Message", "Response")
            .with_use_cases(["autonomous agents", "tool usage", "complex reasoning"])
            .with_connections(["LanguageModel", "WebSearchTool", "ChatInput", "ChatOutput"]),
        // Data
        ComponentRecord::new("FileLoader", Category::Data)
            .with_display_name("File")
            .with_description("Load and process files (PDF, TXT, DOCX, etc.)")
            .with_input("path", "str", "File Path")
            .with_output("data", "Data", "Data")
            .with_use_cases(["document loading", "file processing", "data ingestion"])
            .with_connections(["TextSplitter", "VectorStore"]),
        ComponentRecord::new("TextSplitter", Category::Processing)
            .with_display_name("Text Splitter")
            .with_description("Split text into chunks for processing")
            .with_required_input("documents", "Data", "Documents")
            .with_input("chunk_size", "int", "Chunk Size")
            .with_input("chunk_overlap", "int", "Chunk Overlap")
            .with_output("chunks", "Data", "Text Chunks")
            .with_use_cases(["document chunking", "text preprocessing", "RAG preparation"])
            .with_connections(["FileLoader", "VectorStore", "Embeddings"]),
        // Embeddings
        ComponentRecord::new("Embeddings", Category::Embeddings)
            .with_description("Text embedding models")
            .with_input("api_key", "str", "API Key")
            .with_input("model", "str", "Model Name")
            .with_output("embeddings", "Embeddings", "Embeddings")
            .with_use_cases(["text embeddings", "semantic similarity", "vector search"])
            .with_connections(["VectorStore", "TextSplitter"]),
        // Vector stores
        ComponentRecord::new("VectorStore", Category::VectorStores)
            .with_display_name("Vector Store")
            .with_description("Vector database for semantic search")
            .with_required_input("documents", "Data", "Documents")
            .with_input("embedding", "Embeddings", "Embedding Model")
            .with_input("collection_name", "str", "Collection Name")
            .with_output("retriever", "Retriever", "Retriever")
            .with_use_cases(["semantic search", "RAG systems", "document retrieval"])
            .with_connections(["TextSplitter", "Embeddings"]),
        // Tools
        ComponentRecord::new("CalculatorComponent", Category::Tools)
            .with_display_name("Calculator")
            .with_description("Perform mathematical calculations")
            .with_input("expression", "str", "Expression")
            .with_output("result", "str", "Result")
            .with_output("component_as_tool", "Tool", "Tool")
            .with_use_cases(["mathematical operations", "agent tools", "calculations"])
            .with_connections(["Agent"]),
        ComponentRecord::new("WebSearchTool", Category::Tools)
            .with_display_name("Web Search")
            .with_description("Search the web for information")
            .with_input("query", "str", "Search Query")
            .with_input("api_key", "str", "API Key")
            .with_output("results", "str", "Search Results")
            .with_output("component_as_tool", "Tool", "Tool")
            .with_use_cases(["web search", "information retrieval", "agent tools"])
            .with_connections(["Agent"]),
    ]
}
