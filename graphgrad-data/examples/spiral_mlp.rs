//! Trains a two-layer perceptron on the Spiral dataset.
//!
//! Run with `RUST_LOG=info cargo run -p graphgrad-data --example spiral_mlp`.

use graphgrad_core::model::Sequential;
use graphgrad_core::nn::Activation;
use graphgrad_core::ops::loss::softmax_cross_entropy;
use graphgrad_core::optim::{Optimizer, Sgd};
use graphgrad_core::utils::accuracy;
use graphgrad_core::{no_grad, GraphGradError, Tensor};
use graphgrad_data::{DataLoader, Spiral};

const MAX_EPOCH: usize = 300;
const BATCH_SIZE: usize = 30;
const HIDDEN_SIZE: usize = 10;
const LEARNING_RATE: f64 = 1.0;

fn main() -> Result<(), GraphGradError> {
    env_logger::init();

    let mut train_loader = DataLoader::new(Spiral::new(true)?, BATCH_SIZE, true)?;
    let mut test_loader = DataLoader::new(Spiral::new(false)?, BATCH_SIZE, false)?;
    let mut model = Sequential::mlp(&[HIDDEN_SIZE, Spiral::CLASS_SIZE], Activation::Sigmoid);
    let mut optimizer = Sgd::new(LEARNING_RATE);

    for epoch in 0..MAX_EPOCH {
        let (mut loss_sum, mut acc_sum, mut count) = (0.0, 0.0, 0usize);
        for batch in train_loader.by_ref() {
            let (x, t) = batch?;
            let n = x.shape()[0] as f64;
            let (x, t) = (Tensor::new(x), Tensor::new(t));
            let score = model.predict(&x)?;
            let loss = softmax_cross_entropy(&score, &t)?;

            model.clear_grads();
            loss.backward()?;
            optimizer.update(&model.parameters())?;

            loss_sum += loss.item()? * n;
            acc_sum += accuracy(&score, &t)? * n;
            count += n as usize;
        }

        let (mut test_loss, mut test_acc, mut test_count) = (0.0, 0.0, 0usize);
        for batch in test_loader.by_ref() {
            let (x, t) = batch?;
            let n = x.shape()[0] as f64;
            let (x, t) = (Tensor::new(x), Tensor::new(t));
            let (loss, acc) = no_grad(|| -> Result<(f64, f64), GraphGradError> {
                let score = model.predict(&x)?;
                Ok((softmax_cross_entropy(&score, &t)?.item()?, accuracy(&score, &t)?))
            })?;
            test_loss += loss * n;
            test_acc += acc * n;
            test_count += n as usize;
        }

        log::info!(
            "epoch {:>3}: train loss {:.4}, accuracy {:.4} | test loss {:.4}, accuracy {:.4}",
            epoch + 1,
            loss_sum / count as f64,
            acc_sum / count as f64,
            test_loss / test_count as f64,
            test_acc / test_count as f64
        );
    }
    Ok(())
}
