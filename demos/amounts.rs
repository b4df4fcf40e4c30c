use mdblocks::{Block, List, Span, SpanAttributes};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let md = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "## March\n\nRent ¥-1200 paid, salary ¥3400 received.\n\n- coffee $4.50\n- refund €12"
            .to_string()
    };

    let blocks = mdblocks::parse(&md);

    let mut amounts = Vec::new();
    for block in &blocks {
        collect_block_amounts(block, &mut amounts);
    }

    let mut total = 0.0;
    for amount in &amounts {
        let value = mdblocks::amount_value(amount);
        let sign = if value > 0.0 { "+" } else { "-" };
        println!("{} {}", sign, amount.trim());
        total += value;
    }
    println!("net: {:.2} across {} amounts", total, amounts.len());
}

fn collect_block_amounts(block: &Block, amounts: &mut Vec<String>) {
    match block {
        Block::Heading { content, .. }
        | Block::Paragraph { content }
        | Block::Quote { content } => collect_span_amounts(content, amounts),
        Block::List { list, .. } => collect_list_amounts(list, amounts),
        Block::Code { .. } | Block::Image { .. } | Block::ThematicBreak => {}
    }
}

fn collect_list_amounts(list: &List, amounts: &mut Vec<String>) {
    for item in &list.items {
        collect_span_amounts(&item.content, amounts);
        if let Some(ref nested) = item.nested {
            collect_list_amounts(nested, amounts);
        }
    }
}

fn collect_span_amounts(spans: &[Span], amounts: &mut Vec<String>) {
    for span in spans {
        if span.attributes.contains(SpanAttributes::MONEY) {
            amounts.push(span.content.clone());
        }
    }
}
