//! Loading the dataset from disk.

use std::io::Write;

use rxlens_data::{AgeBucket, DataLoadError, DatasetStore, Sex, TextEncoding};

fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

#[tokio::test]
async fn test_load_webmd_shaped_file() {
    let file = write_temp(
        b"Age,Condition,Date,Drug,DrugId,EaseofUse,Effectiveness,Reviews,Satisfaction,Sex,Sides,UsefulCount\n\
          17,Acne,1/1/2015,Doxycycline,1,5,4,\"worked, slowly\",4,Female,dry skin,2\n\
          66,Hypertension,1/2/2015,Lisinopril,2,5,5,steady,5,Male,cough,9\n",
    );

    let store = DatasetStore::load(file.path()).await.unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.all_conditions(), ["Acne", "Hypertension"]);
    let first = &store.records()[0];
    assert_eq!(first.reviews, "worked, slowly");
    assert_eq!(first.sex, Sex::Female);
    assert_eq!(first.age_bucket, Some(AgeBucket::Child));
    assert_eq!(store.records()[1].age_bucket, Some(AgeBucket::Senior));
}

#[tokio::test]
async fn test_load_latin1_file() {
    let mut bytes = b"Age,Drug,Condition,Sex,Satisfaction,Reviews\n,X,Flu,Male,3,caf".to_vec();
    bytes.push(0xE9);
    bytes.push(b'\n');
    let file = write_temp(&bytes);

    let store = DatasetStore::load(file.path()).await.unwrap();
    assert_eq!(store.records()[0].reviews, "café");
    assert_eq!(store.load_report().encoding, TextEncoding::Latin1);
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DatasetStore::load(dir.path().join("absent.csv")).await.unwrap_err();
    assert!(matches!(err, DataLoadError::Io { .. }), "got {err}");
}

#[tokio::test]
async fn test_missing_columns_reported_by_name() {
    let file = write_temp(b"Condition,Drug,Reviews\nFlu,X,good\n");
    let err = DatasetStore::load(file.path()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dataset is missing required columns: Age, Sex, Satisfaction"
    );
}

#[test]
fn test_from_reader() {
    let csv = "Age,Drug,Condition,Sex,Satisfaction,Reviews\n20,X,Flu,Other,1,hm\n";
    let store = DatasetStore::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(store.records()[0].sex, Sex::Other("Other".into()));
}
