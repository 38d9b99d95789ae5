//! This bench measures validation throughput for a complete exhibit record,
//! for a record that fails the structural stage, and for a batch validated in
//! parallel with a shared validator.

#![allow(missing_docs)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use exhibit_validator::Validator;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

const RECORD: &str = r#"<Exhibit xmlns="http://museum.example.com/exhibit" id="EXH001" status="Active">
    <BasicInfo>
        <Title>Ancient Greek Amphora</Title>
        <Category>Pottery</Category>
        <DateCreated>500 p.n.e. - 400 p.n.e.</DateCreated>
    </BasicInfo>
    <Description>
        <ShortDescription>A Greek amphora of the classical period</ShortDescription>
        <Tags><Tag>mythology</Tag><Tag>ceramics</Tag></Tags>
    </Description>
    <Technical>
        <Dimensions unit="cm"><Height>45.5</Height><Width>28.0</Width></Dimensions>
        <Material>Clay</Material>
        <Condition>Good</Condition>
    </Technical>
    <Location onDisplay="true">
        <Building>Main Building</Building>
        <Room>Greek Hall</Room>
        <Display>Case G-15</Display>
    </Location>
    <History>
        <Acquisition>
            <Date>1995-03-15</Date>
            <Method>Purchase</Method>
            <Source>Private collection</Source>
            <Price>15000</Price>
        </Acquisition>
        <Exhibitions>
            <Exhibition>
                <Name>Classical Greece</Name>
                <Location>Athens</Location>
                <StartDate>2001-05-01</StartDate>
                <EndDate>2001-09-30</EndDate>
            </Exhibition>
        </Exhibitions>
    </History>
    <Media>
        <Image primary="true"><FileName>amphora_front.jpg</FileName></Image>
        <Image><FileName>amphora_back.jpg</FileName></Image>
    </Media>
</Exhibit>"#;

fn single(c: &mut Criterion) {
    let validator = Validator::default();
    let broken = RECORD.replace("<Condition>Good</Condition>", "<Condition>Broken</Condition>");

    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Bytes(RECORD.len() as u64));
    group.bench_function("valid record", |b| b.iter(|| validator.validate(RECORD)));
    group.bench_function("structural failure", |b| {
        b.iter(|| validator.validate(&broken));
    });
    group.finish();
}

fn batch(c: &mut Criterion) {
    let validator = Validator::default();
    let records: Vec<String> = (1..=500)
        .map(|n| RECORD.replace("EXH001", &format!("EXH{:03}", n % 999 + 1)))
        .collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("500 records in parallel", |b| {
        b.iter(|| {
            records
                .par_iter()
                .filter(|record| validator.validate(record).is_valid())
                .count()
        });
    });
    group.finish();
}

criterion_group!(benches, single, batch);
criterion_main!(benches);
